//! A studio session: turns a text and a voice selection into a playable WAV,
//! reporting progress as events and keeping only the latest result alive.

pub mod error;
pub mod events;
pub mod result;
pub mod session;

pub use error::GenerationError;
pub use events::{GenerationState, StudioEvent};
pub use result::{GenerationResult, SelectionSummary};
pub use session::{GenerationRequest, Studio};
