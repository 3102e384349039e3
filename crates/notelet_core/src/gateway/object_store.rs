//! Object-storage contract for note image attachments.

use crate::gateway::note_gateway::GatewayResult;

/// Remote blob storage: upload under an opaque key, resolve a key to a
/// displayable URL. Durability and replication belong to the backend.
pub trait ObjectStore {
    /// Stores one blob under `key`, replacing any previous content.
    fn put_object(&self, key: &str, content: &[u8]) -> GatewayResult<()>;
    /// Resolves `key` to a URL the UI layer can render directly.
    fn object_url(&self, key: &str) -> GatewayResult<String>;
}
