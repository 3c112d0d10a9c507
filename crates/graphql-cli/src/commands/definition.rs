use super::{load_fragments, location, not_found_message, resolve_at_cursor};
use crate::{Cursor, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use graphql_definition::DefinitionQueryResult;
use std::path::PathBuf;
use std::process;

pub async fn run(
    config_path: Option<PathBuf>,
    project_name: Option<String>,
    file: PathBuf,
    cursor: Cursor,
    format: OutputFormat,
) -> Result<()> {
    let fragments = load_fragments(config_path, project_name.as_deref())?;
    let result = resolve_at_cursor(&file, cursor, &fragments).await?;
    let found = result.as_ref().is_some_and(|result| !result.is_empty());

    match format {
        OutputFormat::Json => {
            // Nothing under the cursor is reported as an empty result
            let result = result.unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Human => print_human(result.as_ref()),
    }

    if !found {
        process::exit(1);
    }

    Ok(())
}

fn print_human(result: Option<&DefinitionQueryResult>) {
    if let Some(message) = not_found_message(result) {
        println!("{}", message.red());
        return;
    }

    for definition in result.into_iter().flat_map(|result| &result.definitions) {
        println!(
            "{} {}",
            definition.name.bold(),
            location(&definition.path, definition.position).cyan()
        );
    }
}
