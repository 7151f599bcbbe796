//! In-memory file store for scaffolding runs.
//!
//! Holds a generated project's files keyed by root-relative path, standing in
//! for a real filesystem until the scaffold is materialized. Besides plain
//! [`read`](MemoryStore::read)/[`write`](MemoryStore::write) access it provides
//! the staged-update discipline used by source patching: [`begin_update`]
//! snapshots a file's text, insertions are staged against offsets in that
//! immutable snapshot, and [`commit_update`] replaces the file wholesale in a
//! single step.
//!
//! [`begin_update`]: MemoryStore::begin_update
//! [`commit_update`]: MemoryStore::commit_update

use rustc_hash::FxHashMap;
use snafu::Snafu;

/// Errors from store access and staged-update commits.
#[derive(Debug, Snafu)]
pub enum StoreError {
    #[snafu(display("no file in store at {path:?}"))]
    MissingFile { path: String },

    #[snafu(display("file at {path:?} is not valid UTF-8"))]
    NotUtf8 { path: String },

    #[snafu(display(
        "insertion offset {offset} out of range for {path:?} (len {len})"
    ))]
    OffsetOutOfRange {
        path: String,
        offset: usize,
        len: usize,
    },

    #[snafu(display("insertion offset {offset} is not a char boundary in {path:?}"))]
    NotCharBoundary { path: String, offset: usize },
}

/// A single staged insertion, anchored to an offset in the original text.
#[derive(Debug, Clone)]
struct Insert {
    offset: usize,
    text: String,
}

/// A pending update to one file.
///
/// Created by [`MemoryStore::begin_update`]. Carries a snapshot of the file's
/// text at that moment; every staged insertion is anchored to a byte offset in
/// the snapshot, so staging order is irrelevant and insertions never shift one
/// another. Nothing is visible in the store until
/// [`MemoryStore::commit_update`] succeeds.
#[derive(Debug)]
pub struct StagedUpdate {
    path: String,
    base: String,
    inserts: Vec<Insert>,
}

impl StagedUpdate {
    /// Stage `text` to be inserted immediately to the right of `offset` in the
    /// original snapshot.
    ///
    /// Offsets are validated at commit time, not here, so a whole batch of
    /// insertions succeeds or fails together.
    pub fn insert_right(&mut self, offset: usize, text: impl Into<String>) {
        self.inserts.push(Insert {
            offset,
            text: text.into(),
        });
    }

    /// Path this update was opened against.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The snapshot the staged offsets are anchored to.
    pub fn base_text(&self) -> &str {
        &self.base
    }
}

/// In-memory file store.
///
/// Paths are stored root-relative (no leading `/`); callers using an
/// absolute-path convention normalize before lookup. Contents are raw bytes so
/// the store can also hold non-source assets.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's bytes, or `None` if absent.
    pub fn read(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Read a file as UTF-8 text.
    ///
    /// Returns `Ok(None)` for an absent file and `NotUtf8` for undecodable
    /// content, so callers can distinguish the two.
    pub fn read_text(&self, path: &str) -> Result<Option<String>, StoreError> {
        match self.files.get(path) {
            None => Ok(None),
            Some(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(Some(text.to_owned())),
                Err(_) => NotUtf8Snafu { path }.fail(),
            },
        }
    }

    /// Create or replace a file.
    pub fn write(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Remove a file. Removing an absent path is a no-op.
    pub fn delete(&mut self, path: &str) {
        self.files.remove(path);
    }

    /// Number of files currently held.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Open a staged update against the file's current text.
    ///
    /// Fails if the file is absent or not UTF-8; staged editing only makes
    /// sense for decodable source text.
    pub fn begin_update(&self, path: &str) -> Result<StagedUpdate, StoreError> {
        let base = self
            .read_text(path)?
            .ok_or_else(|| StoreError::MissingFile {
                path: path.to_owned(),
            })?;
        Ok(StagedUpdate {
            path: path.to_owned(),
            base,
            inserts: Vec::new(),
        })
    }

    /// Apply a staged update, replacing the file's content wholesale.
    ///
    /// Every staged offset is validated against the update's snapshot before
    /// any text is built; one bad offset fails the entire commit and leaves
    /// the store untouched. A partially patched file is worse than an
    /// unpatched one.
    pub fn commit_update(&mut self, update: StagedUpdate) -> Result<(), StoreError> {
        let StagedUpdate {
            path,
            base,
            mut inserts,
        } = update;

        for insert in &inserts {
            if insert.offset > base.len() {
                return OffsetOutOfRangeSnafu {
                    path,
                    offset: insert.offset,
                    len: base.len(),
                }
                .fail();
            }
            if !base.is_char_boundary(insert.offset) {
                return NotCharBoundarySnafu {
                    path,
                    offset: insert.offset,
                }
                .fail();
            }
        }

        // Single ascending pass over the immutable snapshot. Stable sort keeps
        // same-offset insertions in staging order.
        inserts.sort_by_key(|insert| insert.offset);

        let added: usize = inserts.iter().map(|insert| insert.text.len()).sum();
        let mut patched = String::with_capacity(base.len() + added);
        let mut cursor = 0;
        for insert in &inserts {
            patched.push_str(&base[cursor..insert.offset]);
            patched.push_str(&insert.text);
            cursor = insert.offset;
        }
        patched.push_str(&base[cursor..]);

        self.files.insert(path, patched.into_bytes());
        Ok(())
    }
}
