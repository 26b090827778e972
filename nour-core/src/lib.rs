pub mod ai;
pub mod audio;
pub mod catalog;
pub mod settings;
pub mod studio;

// Public library API - front ends (the subprocess bridge, tests) should only
// need these; everything else is public for the curious.
pub use ai::{GeminiProvider, SpeechClient, SpeechProvider};
pub use audio::{ResourceHandle, ResourceStore, WavResource};
pub use catalog::{Gender, VoiceSelection};
pub use settings::{Settings, SettingsManager};
pub use studio::{GenerationRequest, GenerationResult, Studio, StudioEvent};
