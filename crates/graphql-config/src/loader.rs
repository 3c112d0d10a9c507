use crate::{ConfigError, GraphQLConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".graphqlrc.yml",
    ".graphqlrc.yaml",
    ".graphqlrc.json",
    ".graphqlrc",
    "graphql.config.yml",
    "graphql.config.yaml",
    "graphql.config.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();

    loop {
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                return Ok(Some(config_path));
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// Automatically detects the format based on file extension.
pub fn load_config(path: &Path) -> Result<GraphQLConfig> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents, path)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        // .graphqlrc without extension: YAML first, then JSON
        "" if file_name == ".graphqlrc" => {
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Validate the loaded configuration
fn validate_config(config: &GraphQLConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if config.project_count() == 0 {
        return Err(ConfigError::Validation(
            "configuration declares no projects".to_string(),
        ));
    }

    for (project_name, project_config) in config.projects() {
        let patterns = project_config.documents.patterns();
        if patterns.is_empty() {
            return Err(invalid(format!(
                "Project '{project_name}' has empty documents configuration"
            )));
        }

        if patterns.iter().any(|pattern| pattern.trim().is_empty()) {
            return Err(invalid(format!(
                "Project '{project_name}' has empty document pattern"
            )));
        }

        let filters = project_config
            .include
            .iter()
            .chain(project_config.exclude.iter())
            .flatten();
        for filter in filters {
            if let Err(e) = glob::Pattern::new(filter) {
                return Err(invalid(format!(
                    "Project '{project_name}' has invalid include/exclude pattern '{filter}': {e}"
                )));
            }
        }
    }

    Ok(())
}
