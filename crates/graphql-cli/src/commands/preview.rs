use super::{load_fragments, location, not_found_message, resolve_at_cursor};
use crate::{Cursor, OutputFormat};
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_definition::extract_preview;
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

    if let Some(message) = not_found_message(result.as_ref()) {
        match format {
            OutputFormat::Human => println!("{}", message.red()),
            OutputFormat::Json => println!("[]"),
        }
        process::exit(1);
    }
    let definitions = result.map(|result| result.definitions).unwrap_or_default();

    let mut previews = Vec::with_capacity(definitions.len());
    for definition in &definitions {
        let preview = extract_preview(definition)
            .await
            .with_context(|| format!("Failed to preview {}", definition.path))?;

        match format {
            OutputFormat::Human => {
                println!(
                    "{}",
                    location(&definition.path, definition.position).cyan()
                );
                println!("{preview}\n");
            }
            OutputFormat::Json => previews.push(serde_json::json!({
                "definition": definition,
                "preview": preview,
            })),
        }
    }

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&previews)?);
    }

    Ok(())
}
