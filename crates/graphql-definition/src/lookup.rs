use crate::node::name_span;
use crate::{
    DefinitionError, DefinitionNode, DefinitionQueryResult, DefinitionResolver, FragmentInfo,
    LineIndex, Position, Result,
};
use apollo_parser::{cst, Parser};

/// Syntax element found under the cursor
#[derive(Debug, Clone)]
enum ElementAtCursor {
    FragmentSpread(cst::FragmentSpread),
    FragmentDefinition(cst::FragmentDefinition),
    OperationDefinition(cst::OperationDefinition),
}

impl DefinitionResolver {
    /// Resolve whatever sits under `position` in a GraphQL document.
    ///
    /// - Fragment spread names resolve to the matching known fragments.
    /// - Fragment and operation definition names resolve to themselves.
    ///
    /// Returns `Ok(None)` when the cursor is on anything else, and
    /// [`DefinitionError::Parse`] when the document has syntax errors.
    pub fn definition_at(
        &self,
        path: &str,
        source: &str,
        position: Position,
        known_fragments: &[FragmentInfo],
    ) -> Result<Option<DefinitionQueryResult>> {
        let tree = Parser::new(source).parse();

        if tree.errors().len() > 0 {
            let messages: Vec<_> = tree.errors().map(|e| e.message().to_string()).collect();
            return Err(DefinitionError::Parse(messages.join("; ")));
        }

        let Some(offset) = LineIndex::new(source).position_to_offset(position) else {
            tracing::debug!("Position {position:?} is outside of {path}");
            return Ok(None);
        };

        let Some(element) = find_element_at_offset(&tree.document(), offset) else {
            return Ok(None);
        };

        let result = match element {
            ElementAtCursor::FragmentSpread(spread) => {
                self.resolve_fragment_spread(source, &spread, known_fragments)?
            }
            ElementAtCursor::FragmentDefinition(frag) => {
                self.resolve_definition_node(path, source, &frag)?
            }
            ElementAtCursor::OperationDefinition(op) => {
                self.resolve_definition_node(path, source, &op)?
            }
        };

        Ok(Some(result))
    }
}

fn find_element_at_offset(doc: &cst::Document, offset: usize) -> Option<ElementAtCursor> {
    for definition in doc.definitions() {
        match definition {
            cst::Definition::OperationDefinition(op) => {
                if name_contains(op.name_node(), offset) {
                    return Some(ElementAtCursor::OperationDefinition(op));
                }

                if let Some(element) = op
                    .selection_set()
                    .and_then(|selection_set| check_selection_set(&selection_set, offset))
                {
                    return Some(element);
                }
            }
            cst::Definition::FragmentDefinition(frag) => {
                if name_contains(frag.name_node(), offset) {
                    return Some(ElementAtCursor::FragmentDefinition(frag));
                }

                if let Some(element) = frag
                    .selection_set()
                    .and_then(|selection_set| check_selection_set(&selection_set, offset))
                {
                    return Some(element);
                }
            }
            _ => {}
        }
    }

    None
}

fn check_selection_set(
    selection_set: &cst::SelectionSet,
    offset: usize,
) -> Option<ElementAtCursor> {
    for selection in selection_set.selections() {
        let nested = match selection {
            cst::Selection::FragmentSpread(spread) => {
                let name = spread.fragment_name().and_then(|n| n.name());
                if name_contains(name, offset) {
                    return Some(ElementAtCursor::FragmentSpread(spread));
                }
                None
            }
            cst::Selection::Field(field) => field.selection_set(),
            cst::Selection::InlineFragment(inline_frag) => inline_frag.selection_set(),
        };

        if let Some(element) = nested.and_then(|nested| check_selection_set(&nested, offset)) {
            return Some(element);
        }
    }

    None
}

fn name_contains(name: Option<cst::Name>, offset: usize) -> bool {
    name.is_some_and(|name| {
        let (start, end) = name_span(&name);
        offset >= start && offset < end
    })
}
