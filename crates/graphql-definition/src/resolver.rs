use crate::node::{name_span, significant_span};
use crate::{
    Definition, DefinitionError, DefinitionNode, DefinitionQueryResult, FragmentInfo, LineIndex,
    Range, Result, LANGUAGE,
};
use apollo_parser::cst::{self, CstNode};
use std::fmt;

type DiagnosticFn = Box<dyn Fn(&str) + Send + Sync>;

/// Resolves GraphQL references and declarations to [`Definition`]s.
///
/// Resolution itself is pure. Fragment spreads that match no known fragment
/// are reported through the resolver's diagnostic callback, which logs a
/// warning unless replaced with [`DefinitionResolver::with_diagnostics`].
pub struct DefinitionResolver {
    on_unresolved: DiagnosticFn,
}

impl DefinitionResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_unresolved: Box::new(|name: &str| {
                tracing::warn!("Definition not found for GraphQL fragment {name}");
            }),
        }
    }

    /// Use `on_unresolved` instead of logging when a fragment spread has no
    /// matching declaration. It receives the fragment name.
    #[must_use]
    pub fn with_diagnostics(on_unresolved: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            on_unresolved: Box::new(on_unresolved),
        }
    }

    /// Resolve a fragment spread against the known fragment declarations.
    ///
    /// Each match is resolved against its own file and content, not against
    /// `source`. `query_range` holds the spread's range in `source` once per
    /// match, so several declarations of one fragment yield identical ranges.
    pub fn resolve_fragment_spread(
        &self,
        source: &str,
        spread: &cst::FragmentSpread,
        known_fragments: &[FragmentInfo],
    ) -> Result<DefinitionQueryResult> {
        let name = spread
            .fragment_name()
            .and_then(|n| n.name())
            .map(|n| n.text().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(DefinitionError::MissingName {
                kind: "fragment spread",
            })?;

        let matches: Vec<&FragmentInfo> = known_fragments
            .iter()
            .filter(|fragment| fragment.name().as_deref() == Some(name.as_str()))
            .collect();

        if matches.is_empty() {
            (self.on_unresolved)(&name);
            return Ok(DefinitionQueryResult::empty());
        }

        let definitions = matches
            .into_iter()
            .map(|fragment| {
                build_definition(
                    fragment.file_path.as_deref().unwrap_or_default(),
                    &fragment.content,
                    &fragment.definition,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let (start, end) = significant_span(spread.syntax());
        let spread_range = span_to_range(&LineIndex::new(source), start, end);

        Ok(DefinitionQueryResult {
            query_range: vec![spread_range; definitions.len()],
            definitions,
        })
    }

    /// Resolve a fragment or operation definition to itself.
    ///
    /// See [`resolve_definition_node`].
    pub fn resolve_definition_node<N: DefinitionNode>(
        &self,
        path: &str,
        source: &str,
        node: &N,
    ) -> Result<DefinitionQueryResult> {
        resolve_definition_node(path, source, node)
    }
}

impl Default for DefinitionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefinitionResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionResolver").finish_non_exhaustive()
    }
}

/// Resolve a fragment or operation definition to itself.
///
/// Produces exactly one definition, and one query range covering the
/// definition's name token.
pub fn resolve_definition_node<N: DefinitionNode>(
    path: &str,
    source: &str,
    node: &N,
) -> Result<DefinitionQueryResult> {
    let name = node
        .name_node()
        .ok_or(DefinitionError::MissingName { kind: N::KIND })?;

    let (start, end) = name_span(&name);
    let query_range = span_to_range(&LineIndex::new(source), start, end);

    Ok(DefinitionQueryResult {
        definitions: vec![build_definition(path, source, node)?],
        query_range: vec![query_range],
    })
}

/// Build the [`Definition`] for a named fragment or operation declared in `source`.
///
/// `position` is the start of the name; `range` spans the whole declaration.
pub fn build_definition<N: DefinitionNode>(
    path: &str,
    source: &str,
    node: &N,
) -> Result<Definition> {
    let name = node
        .name_node()
        .ok_or(DefinitionError::MissingName { kind: N::KIND })?;

    let index = LineIndex::new(source);
    let (name_start, _) = name_span(&name);
    let (start, end) = significant_span(node.syntax());

    Ok(Definition {
        path: path.to_string(),
        position: index.offset_to_position(name_start),
        range: span_to_range(&index, start, end),
        name: name.text().to_string(),
        language: LANGUAGE.to_string(),
        project_root: path.to_string(),
    })
}

fn span_to_range(index: &LineIndex<'_>, start: usize, end: usize) -> Range {
    Range::new(index.offset_to_position(start), index.offset_to_position(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use apollo_parser::Parser;
    use std::sync::{Arc, Mutex};

    fn operations(source: &str) -> Vec<cst::OperationDefinition> {
        Parser::new(source)
            .parse()
            .document()
            .definitions()
            .filter_map(|definition| match definition {
                cst::Definition::OperationDefinition(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    /// First fragment spread anywhere in the document
    fn first_spread(source: &str) -> cst::FragmentSpread {
        Parser::new(source)
            .parse()
            .document()
            .syntax()
            .descendants()
            .find_map(cst::FragmentSpread::cast)
            .expect("document should contain a fragment spread")
    }

    fn recording_resolver() -> (DefinitionResolver, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let resolver = DefinitionResolver::with_diagnostics(move |name| {
            sink.lock().unwrap().push(name.to_string());
        });
        (resolver, seen)
    }

    const QUERY: &str = "query GetUser {\n  user {\n    ...UserFields\n  }\n}\n";

    #[test]
    fn test_resolve_operation_on_second_line() {
        let source = "query A { x }\nquery B { y }";
        let ops = operations(source);

        let result = resolve_definition_node("/q.graphql", source, &ops[1]).unwrap();

        assert_eq!(result.definitions.len(), 1);
        let definition = &result.definitions[0];
        assert_eq!(definition.name, "B");
        assert_eq!(definition.position, Position::new(1, 6));
        assert_eq!(
            definition.range,
            Range::new(Position::new(1, 0), Position::new(1, 13))
        );
        assert_eq!(definition.language, "GraphQL");
        assert_eq!(definition.path, "/q.graphql");
        assert_eq!(definition.project_root, "/q.graphql");

        assert_eq!(
            result.query_range,
            vec![Range::new(Position::new(1, 6), Position::new(1, 7))]
        );
    }

    #[test]
    fn test_definition_range_excludes_trailing_whitespace() {
        let source = "query A { x }\n\nquery B { y }";
        let ops = operations(source);

        let definition = build_definition("q.graphql", source, &ops[0]).unwrap();

        assert_eq!(
            definition.range,
            Range::new(Position::new(0, 0), Position::new(0, 13))
        );
    }

    #[test]
    fn test_position_row_counts_newlines() {
        let source = "\n\n# comment\nfragment UserFields on User {\n  id\n}\n";
        let fragment = FragmentInfo::from_source(None, source).remove(0);

        let definition = build_definition("f.graphql", source, &fragment.definition).unwrap();

        let name_offset = source.find("UserFields").unwrap();
        assert_eq!(
            definition.position.row,
            source[..name_offset].matches('\n').count()
        );
        assert_eq!(definition.position, Position::new(3, 9));
        assert_eq!(
            definition.range,
            Range::new(Position::new(3, 0), Position::new(5, 1))
        );
    }

    #[test]
    fn test_anonymous_operation_is_contract_violation() {
        let source = "query { x }";
        let ops = operations(source);

        let err = resolve_definition_node("q.graphql", source, &ops[0]).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::MissingName {
                kind: "operation definition"
            }
        ));
        assert!(build_definition("q.graphql", source, &ops[0]).is_err());
    }

    #[test]
    fn test_spread_without_matches_is_empty() {
        let (resolver, seen) = recording_resolver();
        let known = FragmentInfo::from_source(
            Some("other.graphql".to_string()),
            "fragment PostFields on Post { id }",
        );

        let result = resolver
            .resolve_fragment_spread(QUERY, &first_spread(QUERY), &known)
            .unwrap();

        assert_eq!(result, DefinitionQueryResult::empty());
        assert_eq!(*seen.lock().unwrap(), vec!["UserFields".to_string()]);
    }

    #[test]
    fn test_spread_resolves_against_declaring_file() {
        let (resolver, seen) = recording_resolver();
        let fragments = "# shared fragments\n\nfragment UserFields on User {\n  id\n  name\n}\n";
        let known = FragmentInfo::from_source(Some("fragments.graphql".to_string()), fragments);

        let result = resolver
            .resolve_fragment_spread(QUERY, &first_spread(QUERY), &known)
            .unwrap();

        assert_eq!(result.definitions.len(), 1);
        let definition = &result.definitions[0];
        assert_eq!(definition.path, "fragments.graphql");
        assert_eq!(definition.name, "UserFields");
        // Position comes from the declaring text, not the query
        assert_eq!(definition.position, Position::new(2, 9));
        assert_eq!(
            definition.range,
            Range::new(Position::new(2, 0), Position::new(5, 1))
        );

        // Query range is the spread inside the referencing text
        assert_eq!(
            result.query_range,
            vec![Range::new(Position::new(2, 4), Position::new(2, 17))]
        );
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_spread_with_several_declarations_duplicates_query_range() {
        let resolver = DefinitionResolver::new();
        let mut known = FragmentInfo::from_source(
            Some("a.graphql".to_string()),
            "fragment UserFields on User { id }",
        );
        known.extend(FragmentInfo::from_source(
            Some("b.graphql".to_string()),
            "fragment PostFields on Post { id }\nfragment UserFields on User { name }",
        ));
        known.extend(FragmentInfo::from_source(
            None,
            "fragment UserFields on User { email }",
        ));

        let result = resolver
            .resolve_fragment_spread(QUERY, &first_spread(QUERY), &known)
            .unwrap();

        let paths: Vec<_> = result.definitions.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["a.graphql", "b.graphql", ""]);
        assert_eq!(result.definitions[1].position, Position::new(1, 9));

        assert_eq!(result.query_range.len(), 3);
        assert!(result
            .query_range
            .iter()
            .all(|range| *range == result.query_range[0]));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = DefinitionResolver::new();
        let known = FragmentInfo::from_source(
            Some("fragments.graphql".to_string()),
            "fragment UserFields on User { id }",
        );
        let spread = first_spread(QUERY);

        let first = resolver
            .resolve_fragment_spread(QUERY, &spread, &known)
            .unwrap();
        let second = resolver
            .resolve_fragment_spread(QUERY, &spread, &known)
            .unwrap();

        assert_eq!(first, second);
    }
}
