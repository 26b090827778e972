use std::env;
use std::path::PathBuf;

use anyhow::Result;
use nour_subprocess::run_subprocess;
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_tracing()?;

    let args: Vec<String> = env::args().collect();
    let mut settings_path: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--settings-path" {
            i += 1;
            if i < args.len() {
                settings_path = Some(args[i].clone());
            }
        }
        i += 1;
    }

    let local = LocalSet::new();
    local.run_until(run_subprocess(settings_path)).await?;
    Ok(())
}

/// Logs go to a file; stdout carries the protocol.
fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    let trace_dir = home.join(".nour-voice").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("nour.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
