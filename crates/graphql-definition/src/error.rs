use thiserror::Error;

pub type Result<T> = std::result::Result<T, DefinitionError>;

pub type PreviewResult<T> = std::result::Result<T, PreviewError>;

#[derive(Debug, Error)]
pub enum DefinitionError {
    /// A syntax node handed to the resolver has no name. Callers must only
    /// pass well-formed nodes; nothing is substituted for the missing name.
    #[error("Expected {kind} to have a name")]
    MissingName { kind: &'static str },

    #[error("Document parse error: {0}")]
    Parse(String),

    #[error("Document loading error: {0}")]
    DocumentLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row} is out of bounds ({line_count} lines)")]
    RowOutOfBounds { row: usize, line_count: usize },
}
