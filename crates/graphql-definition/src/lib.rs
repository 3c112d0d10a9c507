//! Definition lookup and declaration previews for GraphQL documents.
//!
//! [`DefinitionResolver`] turns fragment spreads and fragment/operation
//! definitions into [`Definition`]s; [`extract_preview`] reads the file a
//! definition points at and returns a short snippet of the declaration.

mod error;
mod fragments;
mod line_index;
mod lookup;
mod node;
mod preview;
mod resolver;
mod types;

pub use error::{DefinitionError, PreviewError, PreviewResult, Result};
pub use fragments::{FragmentInfo, FragmentLoader};
pub use line_index::LineIndex;
pub use node::DefinitionNode;
pub use preview::{dedent, extract_preview, preview_from_source, MAX_PREVIEW_LINES};
pub use resolver::{build_definition, resolve_definition_node, DefinitionResolver};
pub use types::{Definition, DefinitionQueryResult, Position, Range, LANGUAGE};

// Re-export the syntax tree types callers hand to the resolver
pub use apollo_parser::cst;
