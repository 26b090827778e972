use std::path::PathBuf;
use std::sync::Arc;

use nour_core::ai::{GeminiConfig, GeminiProvider, SpeechClient};
use nour_core::audio::ResourceStore;
use nour_core::catalog::{control_groups, ControlGroup, Dialect, VoiceField, VoiceSelection, DIALECTS, VOICE_FIELDS};
use nour_core::settings::{Settings, SettingsManager};
use nour_core::studio::{GenerationRequest, GenerationResult, Studio, StudioEvent};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::{io, io::AsyncWriteExt};
use tracing::{info, warn};

/// One request per stdin line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StudioMessage {
    Refine {
        text: String,
        selection: VoiceSelection,
    },
    Generate {
        text: String,
        selection: VoiceSelection,
        /// Falls back to `refine_by_default` from settings.
        #[serde(default)]
        refine: Option<bool>,
    },
    Discard,
    ListCatalog,
}

/// Direct answer to a [`StudioMessage`]. Every message gets exactly one;
/// `StudioEvent`s are interleaved on the same stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum Reply {
    Refined {
        text: String,
    },
    Generated {
        result: GenerationResult,
        /// Absent when a later attempt already superseded this one.
        data_uri: Option<String>,
        download_name: String,
    },
    DiscardCompleted {
        discarded: bool,
    },
    Catalog {
        dialects: &'static [Dialect],
        fields: &'static [VoiceField],
        controls: Vec<ControlGroup>,
    },
    Error {
        message: String,
    },
}

#[derive(Clone)]
pub struct Bridge {
    studio: Studio,
    refine_by_default: bool,
}

impl Bridge {
    pub fn new(studio: Studio, refine_by_default: bool) -> Self {
        Self {
            studio,
            refine_by_default,
        }
    }

    pub async fn handle(&self, message: StudioMessage) -> Reply {
        match message {
            StudioMessage::Refine { text, selection } => {
                match self.studio.refine(&text, &selection).await {
                    Ok(text) => Reply::Refined { text },
                    Err(e) => {
                        warn!(?e, "Refine request rejected");
                        Reply::Error {
                            message: e.user_message().to_string(),
                        }
                    }
                }
            }
            StudioMessage::Generate {
                text,
                selection,
                refine,
            } => {
                let request = GenerationRequest {
                    text,
                    selection,
                    refine: refine.unwrap_or(self.refine_by_default),
                };
                self.generate(request).await
            }
            StudioMessage::Discard => Reply::DiscardCompleted {
                discarded: self.studio.discard(),
            },
            StudioMessage::ListCatalog => Reply::Catalog {
                dialects: DIALECTS,
                fields: VOICE_FIELDS,
                controls: control_groups(),
            },
        }
    }

    async fn generate(&self, request: GenerationRequest) -> Reply {
        match self.studio.generate(request).await {
            Ok(result) => Reply::Generated {
                data_uri: self.studio.store().data_uri(&result.audio),
                download_name: result.download_name(),
                result,
            },
            Err(e) => Reply::Error {
                message: e.user_message().to_string(),
            },
        }
    }
}

pub fn load_settings(settings_path: Option<String>) -> anyhow::Result<Settings> {
    let manager = match settings_path {
        Some(path) => SettingsManager::from_path(PathBuf::from(path))?,
        None => SettingsManager::new()?,
    };
    info!(path = ?manager.path(), "Settings loaded");
    Ok(manager.settings())
}

pub fn build_client(settings: &Settings) -> anyhow::Result<SpeechClient> {
    let provider = GeminiProvider::new(GeminiConfig::from_settings(settings)?)?;
    Ok(
        SpeechClient::new(Arc::new(provider), ResourceStore::new())
            .with_timeout(settings.request_timeout())
            .with_format(settings.audio),
    )
}

pub async fn run_subprocess(settings_path: Option<String>) -> anyhow::Result<()> {
    let settings = load_settings(settings_path)?;
    let (studio, event_rx) = Studio::new(build_client(&settings)?);
    let bridge = Bridge::new(studio, settings.refine_by_default);

    serve(bridge, event_rx, io::stdin(), io::stdout()).await
}

/// Pumps JSON lines from `input` through `bridge` and writes events and
/// replies to `output`. At end of input, requests still in flight are
/// awaited so each one gets its reply before this returns.
pub async fn serve<R, W>(
    bridge: Bridge,
    mut event_rx: mpsc::UnboundedReceiver<StudioEvent>,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    let mut handlers: JoinSet<Reply> = JoinSet::new();
    let mut input_open = true;

    while input_open || !handlers.is_empty() {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    info!(in_flight = handlers.len(), "Input closed, finishing pending requests");
                    input_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<StudioMessage>(&line) {
                    // Generations may overlap; the studio decides which one sticks.
                    Ok(message) => {
                        let bridge = bridge.clone();
                        handlers.spawn(async move { bridge.handle(message).await });
                    }
                    Err(e) => {
                        warn!(?e, "Unparseable message on stdin");
                        let reply = Reply::Error {
                            message: format!("Invalid message: {e}"),
                        };
                        write_line(&mut output, &reply).await?;
                    }
                }
            }
            Some(event) = event_rx.recv() => {
                write_line(&mut output, &event).await?;
            }
            Some(joined) = handlers.join_next(), if !handlers.is_empty() => {
                let reply = joined.unwrap_or_else(|e| {
                    warn!(?e, "Request handler panicked");
                    Reply::Error {
                        message: format!("Request failed: {e}"),
                    }
                });
                write_line(&mut output, &reply).await?;
            }
        }
    }

    // Terminal events of the last attempts may still be queued.
    while let Ok(event) = event_rx.try_recv() {
        write_line(&mut output, &event).await?;
    }
    output.flush().await?;
    Ok(())
}

async fn write_line<W, T>(output: &mut W, value: &T) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let json = format!("{}\n", serde_json::to_string(value)?);
    output.write_all(json.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
