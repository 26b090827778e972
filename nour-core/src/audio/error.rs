use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid base64 payload ({len} chars): {source}")]
    Base64 {
        len: usize,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Invalid PCM layout: {0}")]
    Layout(String),
}
