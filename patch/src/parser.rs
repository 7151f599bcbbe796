//! Tree-sitter based parsing of the patch target file.
//!
//! The grammar is an off-the-shelf black box; the patcher only walks the
//! resulting tree. tree-sitter recovers from syntax errors with ERROR nodes
//! instead of failing, which matches the tolerance this component needs: the
//! target file may reference unresolved symbols and still be patchable.

use snafu::Snafu;
use tree_sitter::{Parser as TsParser, Tree};

/// Supported languages for parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// TypeScript sources (`.ts`)
    TypeScript,
    /// TypeScript with JSX (`.tsx`)
    Tsx,
}

/// Parser errors
#[derive(Debug, Snafu)]
pub enum ParseError {
    #[snafu(display("tree-sitter rejected the {:?} grammar", language))]
    Grammar { language: Language },

    #[snafu(display("tree-sitter produced no syntax tree"))]
    NoTree,
}

/// Language-specific parser wrapping a tree-sitter instance
pub struct Parser {
    /// The language this parser is configured for
    language: Language,

    /// Tree-sitter parser instance
    ts_parser: TsParser,
}

impl Parser {
    /// Create a parser for the specified language
    pub fn from_language(language: Language) -> Result<Self, ParseError> {
        let grammar = match language {
            Language::TypeScript => tree_sitter_typescript::language_typescript(),
            Language::Tsx => tree_sitter_typescript::language_tsx(),
        };
        let mut ts_parser = TsParser::new();
        ts_parser
            .set_language(grammar)
            .map_err(|_| ParseError::Grammar { language })?;

        Ok(Self {
            language,
            ts_parser,
        })
    }

    /// Parse text into a syntax tree
    pub fn parse_text(&mut self, text: &str) -> Result<Tree, ParseError> {
        self.ts_parser.parse(text, None).ok_or(ParseError::NoTree)
    }

    /// Get the language this parser is configured for
    pub fn language(&self) -> Language {
        self.language
    }
}

impl Language {
    /// Get the file extensions associated with this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
        }
    }

    /// Get the human-readable name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
        }
    }

    /// Pick a language from a path's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = std::path::Path::new(path).extension()?.to_str()?;
        [Language::TypeScript, Language::Tsx]
            .into_iter()
            .find(|language| language.extensions().contains(&ext))
    }
}
