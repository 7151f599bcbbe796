//! Turning located anchors into insertion instructions.
//!
//! Plans are pure values computed from original node boundaries: no file is
//! touched here, the offsets never overlap, and nothing needs re-parsing
//! before the commit applies them.

use crate::locate::{ImportAnchor, ObjectAnchor};

/// A single planned insertion: `text` goes immediately to the right of
/// `offset` in the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub text: String,
}

/// Plan the class-side edit: the configuration option becomes the last key of
/// the decorator's options object.
///
/// An empty object has no last property to anchor on; the option is inserted
/// as the sole element right after the opening `{` instead.
pub fn plan_option(anchor: &ObjectAnchor, option: &str) -> Insertion {
    match anchor.last_property_end {
        Some(end) => Insertion {
            offset: end,
            text: format!(",\n  {option}"),
        },
        None => Insertion {
            offset: anchor.open_end,
            text: format!(" {option} "),
        },
    }
}

/// Plan the import-side edit: the symbol is appended to the named-import
/// list, or inserted as its sole element when the list is empty.
pub fn plan_import(anchor: &ImportAnchor, symbol: &str) -> Insertion {
    match anchor.last_specifier_end {
        Some(end) => Insertion {
            offset: end,
            text: format!(", {symbol}"),
        },
        None => Insertion {
            offset: anchor.open_end,
            text: symbol.to_owned(),
        },
    }
}
