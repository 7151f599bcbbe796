//! The patch operation: parse, locate, plan, commit.

use crate::{
    bridge, locate,
    parser::{Language, ParseError, Parser},
    plan,
};
use armature_vfs::{MemoryStore, StoreError};
use snafu::{ResultExt, Snafu};
use tracing::debug;

/// Configuration constants for one decorator patch.
///
/// Everything here is fixed at configuration time, not discovered at runtime
/// (the names to match and the payloads to insert).
#[derive(Debug, Clone)]
pub struct DecoratorPatch {
    /// Absolute virtual path of the file to patch.
    pub file: String,
    /// Callee name of the decorator invocation to extend.
    pub decorator: String,
    /// Module specifier of the import declaration to extend.
    pub module: String,
    /// Source text of the option appended to the decorator's options object.
    pub option: String,
    /// Name appended to the module's named-import list.
    pub symbol: String,
}

impl DecoratorPatch {
    /// The stock configuration applied by the scaffolding pipeline: default
    /// the generated root component to the OnPush change-detection strategy.
    pub fn on_push(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            decorator: "Component".to_owned(),
            module: "@angular/core".to_owned(),
            option: "changeDetection: ChangeDetectionStrategy.OnPush".to_owned(),
            symbol: "ChangeDetectionStrategy".to_owned(),
        }
    }
}

/// Fatal failures of the patch operation.
///
/// The recoverable conditions (unrecognized decorator form, no matching class
/// or import, empty collections) never surface here; they degrade to warnings
/// and leave the affected half of the patch unplanned.
#[derive(Debug, Snafu)]
pub enum PatchError {
    #[snafu(display("entry file {path:?} not found in store"))]
    MissingEntryFile { path: String },

    #[snafu(display("parsing {path:?} failed: {source}"))]
    Parse { path: String, source: ParseError },

    #[snafu(display("staged update for {path:?} failed: {source}"))]
    Store { path: String, source: StoreError },
}

/// Apply one decorator patch to the store.
///
/// The only observable effect is the entry file's content being replaced,
/// atomically, at the end; intermediate state never escapes. Applying the same
/// patch twice appends twice -- the operation assumes a freshly generated
/// project and does not guard against re-application.
pub fn apply(store: &mut MemoryStore, patch: &DecoratorPatch) -> Result<(), PatchError> {
    let path = patch.file.as_str();

    let src = bridge::load(store, path)
        .context(StoreSnafu { path })?
        .ok_or_else(|| PatchError::MissingEntryFile {
            path: path.to_owned(),
        })?;

    let language = Language::from_path(path).unwrap_or(Language::TypeScript);
    let mut parser = Parser::from_language(language).context(ParseSnafu { path })?;
    let tree = parser.parse_text(&src).context(ParseSnafu { path })?;

    let located = locate::locate(&tree, &src, &patch.decorator, &patch.module);

    let mut update = store
        .begin_update(bridge::store_key(path))
        .context(StoreSnafu { path })?;
    if let Some(anchor) = &located.object {
        let insertion = plan::plan_option(anchor, &patch.option);
        update.insert_right(insertion.offset, insertion.text);
    }
    if let Some(anchor) = &located.import {
        let insertion = plan::plan_import(anchor, &patch.symbol);
        update.insert_right(insertion.offset, insertion.text);
    }

    debug!(
        path,
        class_edit = located.object.is_some(),
        import_edit = located.import.is_some(),
        "committing decorator patch"
    );
    store.commit_update(update).context(StoreSnafu { path })?;
    Ok(())
}
