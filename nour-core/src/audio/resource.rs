use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::wav::WavResource;

const HANDLE_PREFIX: &str = "nour-voice://audio/";

/// Short-lived reference to a WAV registered in a [`ResourceStore`]. Usable
/// by the UI for playback and download until it is revoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    fn generate() -> Self {
        Self(format!("{HANDLE_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of live WAV resources. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct ResourceStore {
    resources: Arc<Mutex<HashMap<ResourceHandle, Arc<WavResource>>>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, wav: WavResource) -> ResourceHandle {
        let handle = ResourceHandle::generate();
        debug!(%handle, len = wav.len(), "Registering WAV resource");
        self.resources
            .lock()
            .unwrap()
            .insert(handle.clone(), Arc::new(wav));
        handle
    }

    pub fn resolve(&self, handle: &ResourceHandle) -> Option<Arc<WavResource>> {
        self.resources.lock().unwrap().get(handle).cloned()
    }

    /// Releases the resource. Returns false if it was already revoked.
    pub fn revoke(&self, handle: &ResourceHandle) -> bool {
        let removed = self.resources.lock().unwrap().remove(handle).is_some();
        if removed {
            debug!(%handle, "Revoked WAV resource");
        }
        removed
    }

    /// `data:` URI for the resource, directly usable as an audio source or a
    /// download link.
    pub fn data_uri(&self, handle: &ResourceHandle) -> Option<String> {
        let wav = self.resolve(handle)?;
        Some(format!(
            "data:{};base64,{}",
            WavResource::MIME_TYPE,
            STANDARD.encode(wav.as_bytes())
        ))
    }

    pub fn len(&self) -> usize {
        self.resources.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::pcm::DecodedAudioBuffer;
    use crate::audio::wav::encode_sample_buffer_to_wav;

    fn wav(frames: usize) -> WavResource {
        let buffer = DecodedAudioBuffer::from_planes(24_000, vec![vec![0.0; frames]]).unwrap();
        encode_sample_buffer_to_wav(&buffer).unwrap()
    }

    #[test]
    fn test_register_resolve_revoke() {
        let store = ResourceStore::new();

        let handle = store.register(wav(4));
        assert!(handle.url().starts_with("nour-voice://audio/"));
        assert_eq!(store.resolve(&handle).unwrap().len(), 52);

        assert!(store.revoke(&handle));
        assert!(store.resolve(&handle).is_none());
        assert!(!store.revoke(&handle));
        assert!(store.is_empty());
    }

    #[test]
    fn test_handles_are_unique() {
        let store = ResourceStore::new();
        let first = store.register(wav(1));
        let second = store.register(wav(1));

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clones_share_registry() {
        let store = ResourceStore::new();
        let handle = store.clone().register(wav(1));
        assert!(store.resolve(&handle).is_some());
    }

    #[test]
    fn test_data_uri_embeds_wav_bytes() {
        let store = ResourceStore::new();
        let handle = store.register(wav(2));

        let uri = store.data_uri(&handle).unwrap();
        let encoded = uri.strip_prefix("data:audio/wav;base64,").unwrap();
        let bytes = STANDARD.decode(encoded).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(bytes.len(), 48);

        store.revoke(&handle);
        assert!(store.data_uri(&handle).is_none());
    }
}
