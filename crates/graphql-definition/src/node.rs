use apollo_parser::{
    cst::{self, CstNode},
    SyntaxKind, SyntaxNode,
};

/// A named declaration that can be jumped to
pub trait DefinitionNode: CstNode {
    /// Human readable node kind, used in contract-violation errors
    const KIND: &'static str;

    fn name_node(&self) -> Option<cst::Name>;
}

impl DefinitionNode for cst::FragmentDefinition {
    const KIND: &'static str = "fragment definition";

    fn name_node(&self) -> Option<cst::Name> {
        self.fragment_name().and_then(|n| n.name())
    }
}

impl DefinitionNode for cst::OperationDefinition {
    const KIND: &'static str = "operation definition";

    fn name_node(&self) -> Option<cst::Name> {
        self.name()
    }
}

/// Byte span of a name's identifier token.
///
/// The `Name` node also owns any whitespace that trails the identifier, so the
/// token is used instead of the node.
pub(crate) fn name_span(name: &cst::Name) -> (usize, usize) {
    name.ident_token().map_or_else(
        || significant_span(name.syntax()),
        |token| {
            let range = token.text_range();
            (range.start().into(), range.end().into())
        },
    )
}

/// Byte span of a node without leading or trailing trivia.
pub(crate) fn significant_span(node: &SyntaxNode) -> (usize, usize) {
    let mut span: Option<(usize, usize)> = None;

    let tokens = node
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| {
            !matches!(
                token.kind(),
                SyntaxKind::WHITESPACE | SyntaxKind::COMMENT | SyntaxKind::COMMA
            )
        });

    for token in tokens {
        let range = token.text_range();
        let end: usize = range.end().into();
        span = Some(span.map_or_else(|| (range.start().into(), end), |(start, _)| (start, end)));
    }

    span.unwrap_or_else(|| {
        let range = node.text_range();
        (range.start().into(), range.end().into())
    })
}
