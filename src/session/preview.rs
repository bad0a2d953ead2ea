use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Bytes kept alive for a preview, plus how to serve them.
#[derive(Debug, Clone)]
pub struct PreviewBlob {
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

/// Display handle for a selected file, valid until revoked.
///
/// Not `Clone`: whoever holds it owns the preview.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    id: u64,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Path the studio serves this preview under.
    pub fn url(&self) -> String {
        format!("/preview/{}", self.id)
    }
}

/// Hands out preview handles and keeps their bytes until revoked.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: u64,
    live: HashMap<u64, PreviewBlob>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, content_type: impl Into<String>, bytes: Arc<[u8]>) -> PreviewHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.live.insert(id, PreviewBlob { content_type: content_type.into(), bytes });
        debug!(id, live = self.live.len(), "preview created");
        PreviewHandle { id }
    }

    /// Releases the preview. Returns `false` if it was already released.
    pub fn revoke(&mut self, handle: &PreviewHandle) -> bool {
        let released = self.live.remove(&handle.id).is_some();
        if released {
            debug!(id = handle.id, live = self.live.len(), "preview revoked");
        }
        released
    }

    pub fn get(&self, id: u64) -> Option<&PreviewBlob> {
        self.live.get(&id)
    }

    /// Number of previews not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoke_is_idempotent() {
        let mut registry = PreviewRegistry::new();
        let handle = registry.create("image/png", Arc::from(&b"png"[..]));
        assert_eq!(registry.live_count(), 1);

        assert!(registry.revoke(&handle));
        assert!(!registry.revoke(&handle));
        assert!(!registry.revoke(&handle));
        assert_eq!(registry.live_count(), 0);
        assert!(registry.get(handle.id()).is_none());
    }

    #[test]
    fn revoking_one_handle_leaves_the_others() {
        let mut registry = PreviewRegistry::new();
        let a = registry.create("image/png", Arc::from(&b"a"[..]));
        let b = registry.create("image/jpeg", Arc::from(&b"b"[..]));
        assert_ne!(a.url(), b.url());

        registry.revoke(&a);
        let blob = registry.get(b.id()).unwrap();
        assert_eq!(blob.content_type, "image/jpeg");
        assert_eq!(&*blob.bytes, b"b");
    }
}
