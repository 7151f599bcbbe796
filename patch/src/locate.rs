//! Locating the two patch targets in one file's syntax tree.
//!
//! Both searches walk the top-level children once and take the first
//! structural match: the first class carrying a decorator with the expected
//! callee name, and the first import declaration from the expected module.
//! Each half can fail to locate independently; a missing half degrades that
//! half to a no-op rather than failing the patch.

use crate::node::{
    import_specifiers, object_properties, open_brace_end, ClassView, Decorator, ImportView,
    TopLevel,
};
use tracing::{debug, warn};
use tree_sitter::Tree;

/// Anchors for the class-side edit, taken from the decorator's options object.
///
/// `last_property_end` is the byte offset just past the final property, when
/// the object has one; `open_end` is the offset just past the opening `{`,
/// the fallback anchor for an empty object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectAnchor {
    pub last_property_end: Option<usize>,
    pub open_end: usize,
}

/// Anchors for the import-side edit, taken from the named-import list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportAnchor {
    pub last_specifier_end: Option<usize>,
    pub open_end: usize,
}

/// Outcome of the locator walk. Either half may be absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct Located {
    pub object: Option<ObjectAnchor>,
    pub import: Option<ImportAnchor>,
}

/// Walk the top-level children and find the insertion anchors for both edits.
pub fn locate(tree: &Tree, src: &str, decorator_name: &str, module: &str) -> Located {
    let root = tree.root_node();
    let mut located = Located::default();
    let mut class_resolved = false;
    let mut import_resolved = false;

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match TopLevel::classify(child) {
            TopLevel::Class(class) if !class_resolved => {
                let decorators = class.decorators(src);
                // Member-expression callees and other exotic shapes carry no
                // matchable name; they are ignored by the search, not errors.
                if decorators
                    .iter()
                    .any(|decorator| matches!(decorator, Decorator::Other))
                {
                    debug!(
                        class = class.name(src).unwrap_or("<anonymous>"),
                        "decorator in unrecognisable form ignored during search"
                    );
                }
                let matched = decorators
                    .into_iter()
                    .find(|decorator| decorator.name() == Some(decorator_name));
                if let Some(decorator) = matched {
                    class_resolved = true;
                    located.object = object_anchor(decorator, &class, src, decorator_name);
                }
            }
            TopLevel::Import(import) if !import_resolved => {
                if import.specifier(src).as_deref() == Some(module) {
                    import_resolved = true;
                    located.import = import_anchor(&import, module);
                }
            }
            _ => {}
        }
    }

    if !class_resolved {
        debug!(decorator = decorator_name, "no class carries the decorator; class edit skipped");
    }
    if !import_resolved {
        debug!(module, "no matching import declaration; import edit skipped");
    }
    located
}

fn object_anchor(
    decorator: Decorator<'_>,
    class: &ClassView<'_>,
    src: &str,
    decorator_name: &str,
) -> Option<ObjectAnchor> {
    let class_name = class.name(src).unwrap_or("<anonymous>");
    match decorator {
        Decorator::Call {
            argument: Some(argument),
            ..
        } if argument.kind() == "object" => {
            let open_end = open_brace_end(argument)?;
            let last_property_end = object_properties(argument)
                .last()
                .map(|property| property.end_byte());
            Some(ObjectAnchor {
                last_property_end,
                open_end,
            })
        }
        Decorator::Call {
            argument: Some(_), ..
        } => {
            warn!(
                class = class_name,
                decorator = decorator_name,
                "decorator argument is not an options object, skipping class edit"
            );
            None
        }
        Decorator::Call { argument: None, .. } => {
            warn!(
                class = class_name,
                decorator = decorator_name,
                "decorator invocation has no options object, skipping class edit"
            );
            None
        }
        Decorator::Bare { .. } => {
            warn!(
                class = class_name,
                decorator = decorator_name,
                "decorator not recognised (applied without invocation), skipping class edit"
            );
            None
        }
        // Unnameable forms never match the search above.
        Decorator::Other => None,
    }
}

fn import_anchor(import: &ImportView<'_>, module: &str) -> Option<ImportAnchor> {
    let Some(named) = import.named_imports() else {
        debug!(module, "matching import has no named-import list; import edit skipped");
        return None;
    };
    let open_end = open_brace_end(named)?;
    let last_specifier_end = import_specifiers(named)
        .last()
        .map(|specifier| specifier.end_byte());
    Some(ImportAnchor {
        last_specifier_end,
        open_end,
    })
}
