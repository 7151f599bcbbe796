//! Path translation between the parser's absolute-path convention and the
//! store's root-relative keys.
//!
//! The parser side addresses files rooted at `/`, the store keys files
//! relative to the project root. The bridge is a stateless adapter doing that
//! translation in both directions plus the one lookup the patcher needs, so it
//! can be tested without parsing anything.

use armature_vfs::{MemoryStore, StoreError};

/// Store key for a `/`-rooted virtual path.
pub fn store_key(virtual_path: &str) -> &str {
    virtual_path.strip_prefix('/').unwrap_or(virtual_path)
}

/// Virtual path for a store key.
pub fn virtual_path(store_key: &str) -> String {
    if store_key.starts_with('/') {
        store_key.to_owned()
    } else {
        format!("/{store_key}")
    }
}

/// Resolve a virtual path to source text through the store.
///
/// `Ok(None)` is the parser's ordinary missing-file answer; it is fatal only
/// when the requested path is the entry file. Undecodable content is an error,
/// a source file the parser cannot read is unusable.
pub fn load(store: &MemoryStore, virtual_path: &str) -> Result<Option<String>, StoreError> {
    store.read_text(store_key(virtual_path))
}
