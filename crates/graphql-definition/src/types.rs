use serde::{Deserialize, Serialize};

/// Language tag carried by every definition this crate resolves
pub const LANGUAGE: &str = "GraphQL";

/// Position in a document (0-indexed)
///
/// `column` counts UTF-16 code units from the start of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Range in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// A resolved symbol declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// File the declaration lives in
    pub path: String,

    /// Start of the declaration's name
    pub position: Position,

    /// Span of the whole declaration
    pub range: Range,

    /// Declared name
    pub name: String,

    /// Language tag, [`LANGUAGE`] for everything resolved here
    pub language: String,

    /// Always equal to `path`; no project root discovery is attempted
    pub project_root: String,
}

/// Answer to a single definition lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionQueryResult {
    pub definitions: Vec<Definition>,

    /// Where the reference that triggered the lookup sits in the referencing text
    pub query_range: Vec<Range>,
}

impl DefinitionQueryResult {
    /// A lookup that found nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            definitions: Vec::new(),
            query_range: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
