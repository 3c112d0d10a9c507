use crate::{DefinitionError, DefinitionNode, Result};
use apollo_parser::{cst, Parser};
use graphql_config::ProjectConfig;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as GraphQL documents
const GRAPHQL_EXTENSIONS: &[&str] = &["graphql", "gql", "gqls"];

/// A known fragment declaration and the text it was parsed from
#[derive(Debug, Clone)]
pub struct FragmentInfo {
    /// File the fragment was declared in, if it came from a file
    pub file_path: Option<String>,
    /// Full text of the declaring document
    pub content: String,
    pub definition: cst::FragmentDefinition,
}

impl FragmentInfo {
    /// Parse a GraphQL document and collect every fragment definition in it.
    ///
    /// Syntax errors elsewhere in the document do not hide fragments that
    /// parsed; fragments without a name are dropped since nothing can refer
    /// to them.
    #[must_use]
    pub fn from_source(file_path: Option<String>, content: &str) -> Vec<Self> {
        let tree = Parser::new(content).parse();

        if tree.errors().len() > 0 {
            tracing::debug!(
                file = file_path.as_deref().unwrap_or("<memory>"),
                errors = tree.errors().len(),
                "Collecting fragments from document with syntax errors"
            );
        }

        tree.document()
            .definitions()
            .filter_map(|definition| match definition {
                cst::Definition::FragmentDefinition(frag) if frag.name_node().is_some() => {
                    Some(Self {
                        file_path: file_path.clone(),
                        content: content.to_string(),
                        definition: frag,
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Name of the declared fragment
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.definition
            .name_node()
            .map(|name| name.text().to_string())
    }
}

/// Loads fragment declarations from the documents a project configures
pub struct FragmentLoader {
    config: ProjectConfig,
    base_path: Option<PathBuf>,
}

impl FragmentLoader {
    #[must_use]
    pub const fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            base_path: None,
        }
    }

    #[must_use]
    pub fn with_base_path(mut self, path: impl AsRef<Path>) -> Self {
        self.base_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load every fragment from every configured document
    pub fn load(&self) -> Result<Vec<FragmentInfo>> {
        let mut fragments = Vec::new();

        for path in self.find_documents()? {
            match Self::load_file(&path) {
                Ok(found) => {
                    tracing::debug!(
                        "Loaded {} fragment(s) from {}",
                        found.len(),
                        path.display()
                    );
                    fragments.extend(found);
                }
                Err(e) => {
                    // Keep going with the other files
                    tracing::warn!("Failed to load {}: {e}", path.display());
                }
            }
        }

        Ok(fragments)
    }

    /// All GraphQL files matched by the configured patterns, deduplicated,
    /// in discovery order
    pub fn find_documents(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for pattern in self.config.documents.patterns() {
            for path in self.find_files(pattern)? {
                if !files.contains(&path) && self.is_included(&path) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    /// Find files matching a glob pattern. Matched directories are walked
    /// recursively for GraphQL files.
    fn find_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for expanded_pattern in Self::expand_braces(pattern) {
            let full_pattern = self.base_path.as_ref().map_or_else(
                || expanded_pattern.clone(),
                |base| base.join(&expanded_pattern).display().to_string(),
            );

            let entries = glob::glob(&full_pattern).map_err(|e| {
                DefinitionError::DocumentLoad(format!("Invalid glob pattern: {e}"))
            })?;

            for entry in entries {
                let path = entry
                    .map_err(|e| DefinitionError::DocumentLoad(format!("Glob error: {e}")))?;

                if path.is_dir() {
                    files.extend(
                        WalkDir::new(&path)
                            .sort_by_file_name()
                            .into_iter()
                            .filter_map(std::result::Result::ok)
                            .filter(|entry| entry.file_type().is_file())
                            .map(walkdir::DirEntry::into_path)
                            .filter(|path| is_graphql_file(path)),
                    );
                } else if is_graphql_file(&path) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    /// Expand brace patterns like {graphql,gql} into multiple patterns
    fn expand_braces(pattern: &str) -> Vec<String> {
        if let Some(start) = pattern.find('{') {
            if let Some(end) = pattern[start..].find('}').map(|end| start + end) {
                let before = &pattern[..start];
                let after = &pattern[end + 1..];
                let options = &pattern[start + 1..end];

                return options
                    .split(',')
                    .flat_map(|opt| Self::expand_braces(&format!("{before}{opt}{after}")))
                    .collect();
            }
        }

        vec![pattern.to_string()]
    }

    /// Apply the project's include/exclude filters, relative to the base path
    fn is_included(&self, path: &Path) -> bool {
        let relative = self
            .base_path
            .as_ref()
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path);

        self.config.is_included(relative)
    }

    fn load_file(path: &Path) -> Result<Vec<FragmentInfo>> {
        let content = fs::read_to_string(path)?;
        Ok(FragmentInfo::from_source(
            Some(path.display().to_string()),
            &content,
        ))
    }
}

fn is_graphql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| GRAPHQL_EXTENSIONS.contains(&ext))
}
