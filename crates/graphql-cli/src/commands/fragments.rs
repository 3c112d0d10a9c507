use super::{load_fragments, location};
use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use graphql_definition::{build_definition, Definition};
use std::path::PathBuf;

pub fn run(
    config_path: Option<PathBuf>,
    project_name: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let fragments = load_fragments(config_path, project_name.as_deref())?;

    let definitions = fragments
        .iter()
        .map(|fragment| {
            build_definition(
                fragment.file_path.as_deref().unwrap_or_default(),
                &fragment.content,
                &fragment.definition,
            )
        })
        .collect::<graphql_definition::Result<Vec<Definition>>>()?;

    match format {
        OutputFormat::Human => {
            for definition in &definitions {
                println!(
                    "{} {}",
                    definition.name.bold(),
                    location(&definition.path, definition.position).cyan()
                );
            }
            println!(
                "\n{}",
                format!("{} fragment(s)", definitions.len()).green()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&definitions)?);
        }
    }

    Ok(())
}
