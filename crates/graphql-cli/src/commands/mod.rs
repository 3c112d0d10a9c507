pub mod definition;
pub mod fragments;
pub mod preview;

use crate::Cursor;
use anyhow::{ensure, Context, Result};
use graphql_config::{find_config, load_config};
use graphql_definition::{
    DefinitionQueryResult, DefinitionResolver, FragmentInfo, FragmentLoader, Position,
};
use std::path::{Path, PathBuf};

/// Find and load the config, then load every fragment of the selected project
pub fn load_fragments(
    config_path: Option<PathBuf>,
    project_name: Option<&str>,
) -> Result<Vec<FragmentInfo>> {
    let config_path = if let Some(path) = config_path {
        path
    } else {
        let current_dir = std::env::current_dir()?;
        find_config(&current_dir)
            .context("Failed to search for config")?
            .context("No GraphQL config file found")?
    };

    let config = load_config(&config_path).context("Failed to load config")?;

    let base_dir = config_path
        .parent()
        .context("Failed to get config directory")?
        .to_path_buf();

    let (name, project) = config.select_project(project_name)?;
    tracing::debug!("Loading fragments for project '{name}'");

    let fragments = FragmentLoader::new(project.clone())
        .with_base_path(&base_dir)
        .load()
        .with_context(|| format!("Failed to load documents for project '{name}'"))?;

    Ok(fragments)
}

/// Resolve the definition under the cursor in `file`
pub async fn resolve_at_cursor(
    file: &Path,
    cursor: Cursor,
    fragments: &[FragmentInfo],
) -> Result<Option<DefinitionQueryResult>> {
    ensure!(
        cursor.line > 0 && cursor.column > 0,
        "Line and column are 1-based"
    );

    let source = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let position = Position::new(cursor.line - 1, cursor.column - 1);
    let result = DefinitionResolver::new()
        .definition_at(&file.display().to_string(), &source, position, fragments)
        .with_context(|| format!("Failed to resolve definition in {}", file.display()))?;

    Ok(result)
}

/// What to tell the user when a cursor resolves to nothing; `None` when there are definitions
pub fn not_found_message(result: Option<&DefinitionQueryResult>) -> Option<&'static str> {
    match result {
        None => Some("Nothing to resolve at this position"),
        Some(result) if result.is_empty() => Some("✗ No definition found"),
        Some(_) => None,
    }
}

/// `path:line:column`, 1-based
pub fn location(path: &str, position: Position) -> String {
    format!("{path}:{}:{}", position.row + 1, position.column + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_definition::resolve_definition_node;

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            not_found_message(None),
            Some("Nothing to resolve at this position")
        );
        assert_eq!(
            not_found_message(Some(&DefinitionQueryResult::empty())),
            Some("✗ No definition found")
        );

        let source = "fragment UserFields on User { id }";
        let fragment = FragmentInfo::from_source(None, source).remove(0);
        let found = resolve_definition_node("f.graphql", source, &fragment.definition).unwrap();
        assert_eq!(not_found_message(Some(&found)), None);
    }

    #[test]
    fn test_location_is_one_based() {
        assert_eq!(
            location("fragments.graphql", Position::new(2, 9)),
            "fragments.graphql:3:10"
        );
    }
}
