//! AST-based source patching for scaffolded projects.
//!
//! After the base project files exist in the in-memory store and before they
//! are materialized to disk, this crate applies one true source-code
//! transformation: it parses a single generated file with an off-the-shelf
//! grammar, finds the class decorator invocation and the import declaration it
//! cares about, and stages minimal offset-anchored text insertions -- a new
//! option appended to the decorator's options object and a new name appended
//! to the named-import list. The rest of the file is never re-emitted or
//! reformatted.
//!
//! The pipeline is parse -> locate -> plan -> commit, run synchronously once
//! per target file:
//!
//! - [`bridge`] resolves the parser's absolute-path convention against the
//!   store's root-relative keys.
//! - [`parser`] wraps tree-sitter with the TypeScript grammar.
//! - [`node`] and [`locate`] classify top-level syntax nodes and find the two
//!   anchors.
//! - [`plan`] turns anchors into pure insertion instructions.
//! - [`apply`] stages them on an [`armature_vfs::StagedUpdate`] and commits.
//!
//! Patching is deliberately syntax-only: unresolved symbols or type errors in
//! the target file do not matter, and re-applying the patch appends again
//! rather than detecting the earlier run.

pub mod bridge;
pub mod locate;
pub mod node;
pub mod parser;
pub mod plan;

mod apply;

pub use apply::{apply, DecoratorPatch, PatchError};
pub use parser::{Language, ParseError, Parser};
