use crate::{ConfigError, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level navigation configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: HashMap<String, ProjectConfig>,
    },
    /// Single project configuration
    Single(ProjectConfig),
}

impl GraphQLConfig {
    /// Get all projects as an iterator.
    /// For single project configs, yields a single item with name "default".
    /// Named projects are yielded in name order so callers get a stable "first" project.
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once(("default", config))),
            Self::Multi { projects } => {
                let mut named: Vec<_> = projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config))
                    .collect();
                named.sort_by_key(|(name, _)| *name);
                Box::new(named.into_iter())
            }
        }
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == "default" => Some(config),
            Self::Single(_) => None,
            Self::Multi { projects } => projects.get(name),
        }
    }

    /// Pick the project to work with.
    ///
    /// With a name, that project must exist. Without one, the first project
    /// in name order is used ("default" for single-project configs).
    pub fn select_project<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a ProjectConfig)> {
        match name {
            Some(name) => self
                .get_project(name)
                .map(|project| (name, project))
                .ok_or_else(|| ConfigError::ProjectNotFound(name.to_string())),
            None => self.projects().next().ok_or_else(|| {
                ConfigError::Validation("configuration declares no projects".to_string())
            }),
        }
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Configuration for a single project.
///
/// Keys other tools keep in the same file (`schema`, for instance) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Where fragment and operation documents live
    pub documents: DocumentsConfig,

    /// File patterns to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// File patterns to exclude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl ProjectConfig {
    /// Create a project that only lists document patterns
    #[must_use]
    pub const fn new(documents: DocumentsConfig) -> Self {
        Self {
            documents,
            include: None,
            exclude: None,
        }
    }

    /// Check a path (relative to the config directory) against `include` and `exclude`.
    ///
    /// Without an `include` list every path is included. Patterns that fail to
    /// compile never match; `load_config` rejects them up front.
    #[must_use]
    pub fn is_included(&self, path: &Path) -> bool {
        let matches_any = |patterns: &[String]| {
            patterns
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .any(|p| p.matches_path(path))
        };

        if let Some(ref include) = self.include {
            if !matches_any(include) {
                return false;
            }
        }

        self.exclude
            .as_deref()
            .map_or(true, |exclude| !matches_any(exclude))
    }
}

/// Documents source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentsConfig {
    /// Single pattern
    Pattern(String),
    /// Multiple patterns
    Patterns(Vec<String>),
}

impl DocumentsConfig {
    /// Get all document patterns as a slice
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Pattern(pattern) => vec![pattern.as_str()],
            Self::Patterns(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}
