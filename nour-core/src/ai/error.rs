use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    /// Text refinement failed. Recovered by falling back to the input text.
    #[error("Refinement error: {0}")]
    Refinement(anyhow::Error),

    /// Speech synthesis failed or returned no usable audio.
    #[error("Synthesis error: {0}")]
    Synthesis(anyhow::Error),
}
