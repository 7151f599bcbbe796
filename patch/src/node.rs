//! Tagged views over the syntax nodes the patcher dispatches on.
//!
//! Rather than matching raw kind strings all over the locator, the relevant
//! node shapes are classified once into sum types ([`TopLevel`],
//! [`Decorator`]) so the unrecognized forms are explicit branches instead of
//! silent fall-throughs.

use tree_sitter::Node;

/// Classification of one top-level child of the file's syntax tree.
pub enum TopLevel<'t> {
    /// A class declaration, possibly behind an `export` statement.
    Class(ClassView<'t>),
    /// An `import ... from '...'` declaration.
    Import(ImportView<'t>),
    /// Anything else; the patcher walks past it.
    Other,
}

impl<'t> TopLevel<'t> {
    pub fn classify(node: Node<'t>) -> Self {
        match node.kind() {
            "class_declaration" => TopLevel::Class(ClassView {
                class: node,
                wrapper: None,
            }),
            "export_statement" => match node.child_by_field_name("declaration") {
                Some(decl) if decl.kind() == "class_declaration" => TopLevel::Class(ClassView {
                    class: decl,
                    wrapper: Some(node),
                }),
                _ => TopLevel::Other,
            },
            "import_statement" => TopLevel::Import(ImportView { node }),
            _ => TopLevel::Other,
        }
    }
}

/// A class declaration together with the export statement wrapping it, if any.
pub struct ClassView<'t> {
    class: Node<'t>,
    wrapper: Option<Node<'t>>,
}

impl<'t> ClassView<'t> {
    /// The class's declared name.
    pub fn name<'s>(&self, src: &'s str) -> Option<&'s str> {
        let name = self.class.child_by_field_name("name")?;
        name.utf8_text(src.as_bytes()).ok()
    }

    /// Decorators applied to this class, in source order.
    ///
    /// The grammar attaches the decorators of an exported class to the
    /// surrounding export statement, so both owners are scanned.
    pub fn decorators(&self, src: &str) -> Vec<Decorator<'t>> {
        let mut decorators = Vec::new();
        if let Some(wrapper) = self.wrapper {
            collect_decorators(wrapper, src, &mut decorators);
        }
        collect_decorators(self.class, src, &mut decorators);
        decorators
    }
}

fn collect_decorators<'t>(owner: Node<'t>, src: &str, out: &mut Vec<Decorator<'t>>) {
    let mut cursor = owner.walk();
    for child in owner.children(&mut cursor) {
        if child.kind() == "decorator" {
            out.push(Decorator::classify(child, src));
        }
    }
}

/// The form a decorator was applied in.
pub enum Decorator<'t> {
    /// `@Name(...)` -- the invocation form the patcher understands. `argument`
    /// is the invocation's first argument, when present.
    Call {
        name: String,
        argument: Option<Node<'t>>,
    },
    /// `@Name` with no parentheses; recognizable by name but not patchable.
    Bare { name: String },
    /// Member-expression callees and other exotic forms.
    Other,
}

impl<'t> Decorator<'t> {
    fn classify(decorator: Node<'t>, src: &str) -> Self {
        let Some(expr) = decorator.named_child(0) else {
            return Decorator::Other;
        };
        match expr.kind() {
            "call_expression" => match expr.child_by_field_name("function") {
                Some(callee) if callee.kind() == "identifier" => {
                    let Ok(name) = callee.utf8_text(src.as_bytes()) else {
                        return Decorator::Other;
                    };
                    let argument = expr
                        .child_by_field_name("arguments")
                        .and_then(|args| args.named_child(0));
                    Decorator::Call {
                        name: name.to_owned(),
                        argument,
                    }
                }
                _ => Decorator::Other,
            },
            "identifier" => match expr.utf8_text(src.as_bytes()) {
                Ok(name) => Decorator::Bare {
                    name: name.to_owned(),
                },
                Err(_) => Decorator::Other,
            },
            _ => Decorator::Other,
        }
    }

    /// The decorator's callee name, when one is recognizable.
    pub fn name(&self) -> Option<&str> {
        match self {
            Decorator::Call { name, .. } | Decorator::Bare { name } => Some(name),
            Decorator::Other => None,
        }
    }
}

/// An import declaration.
pub struct ImportView<'t> {
    node: Node<'t>,
}

impl<'t> ImportView<'t> {
    /// Module specifier with its quotes stripped.
    pub fn specifier(&self, src: &str) -> Option<String> {
        let source = self.node.child_by_field_name("source")?;
        let raw = source.utf8_text(src.as_bytes()).ok()?;
        Some(
            raw.trim_matches(|c| c == '\'' || c == '"' || c == '`')
                .to_owned(),
        )
    }

    /// The `{ ... }` named-import list; absent for default or namespace-only
    /// imports.
    pub fn named_imports(&self) -> Option<Node<'t>> {
        let mut cursor = self.node.walk();
        let clause = self
            .node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "import_clause")?;
        let mut cursor = clause.walk();
        for child in clause.named_children(&mut cursor) {
            if child.kind() == "named_imports" {
                return Some(child);
            }
        }
        None
    }
}

/// Property-bearing members of an object literal, in source order.
///
/// Filters to actual properties; comments are also named children and must not
/// become insertion anchors.
pub fn object_properties(object: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = object.walk();
    object
        .named_children(&mut cursor)
        .filter(|child| {
            matches!(
                child.kind(),
                "pair" | "shorthand_property_identifier" | "method_definition" | "spread_element"
            )
        })
        .collect()
}

/// The specifiers of a named-import list, in source order.
pub fn import_specifiers(named_imports: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = named_imports.walk();
    named_imports
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "import_specifier")
        .collect()
}

/// Offset just past the opening `{` of a braced list.
///
/// The sole-element anchor for inserting into an empty object literal or empty
/// named-import list.
pub fn open_brace_end(node: Node<'_>) -> Option<usize> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "{" {
            return Some(child.end_byte());
        }
    }
    None
}
