use crate::{Definition, PreviewError, PreviewResult};

/// Upper bound on the number of lines in a preview
pub const MAX_PREVIEW_LINES: usize = 10;

/// Read the file a definition points at and extract a short snippet of the
/// declaration starting at the definition's row.
///
/// The file read is the only suspension point. There is no timeout; wrap the
/// future if one is needed.
pub async fn extract_preview(definition: &Definition) -> PreviewResult<String> {
    tracing::debug!(
        path = %definition.path,
        row = definition.position.row,
        "Extracting definition preview"
    );

    let contents = tokio::fs::read_to_string(&definition.path).await?;
    preview_from_source(&contents, definition.position.row)
}

/// Extract the declaration starting at `row` from in-memory text.
///
/// Lines are taken from `row` onwards until one returns to the starting
/// indentation (or less) while the parentheses seen so far are balanced,
/// and never more than [`MAX_PREVIEW_LINES`]. The snippet is dedented.
pub fn preview_from_source(source: &str, row: usize) -> PreviewResult<String> {
    let lines: Vec<&str> = source.split('\n').collect();

    let Some(first) = lines.get(row) else {
        return Err(PreviewError::RowOutOfBounds {
            row,
            line_count: lines.len(),
        });
    };
    let initial_indent = indent_level(first);

    let mut buffer = Vec::new();
    let mut open_parens = 0;
    let mut close_parens = 0;

    for line in lines.iter().skip(row).take(MAX_PREVIEW_LINES) {
        open_parens += line.matches('(').count();
        close_parens += line.matches(')').count();
        buffer.push(*line);

        if indent_level(line) <= initial_indent && open_parens == close_parens {
            break;
        }
    }

    Ok(dedent(&buffer.join("\n")))
}

/// Remove the longest leading whitespace shared by all non-blank lines.
///
/// Whitespace-only lines become empty, and blank lines at the start and end
/// of the text are dropped.
#[must_use]
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_prefix(line))
        .reduce(|common, prefix| shared_prefix(common, prefix))
        .unwrap_or("");

    let dedented: Vec<&str> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[common.len()..]
            }
        })
        .collect();

    let first = dedented.iter().position(|line| !line.is_empty());
    let last = dedented.iter().rposition(|line| !line.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => dedented[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn indent_level(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn indent_prefix(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(line.len(), |(idx, _)| idx);
    &line[..end]
}

fn shared_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((idx, _), _)| idx);
    &a[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Range, LANGUAGE};
    use insta::assert_snapshot;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn definition_at(path: &str, row: usize) -> Definition {
        Definition {
            path: path.to_string(),
            position: Position::new(row, 0),
            range: Range::new(Position::new(row, 0), Position::new(row, 0)),
            name: "f".to_string(),
            language: LANGUAGE.to_string(),
            project_root: path.to_string(),
        }
    }

    #[test]
    fn test_single_balanced_line() {
        let source = "def f():\n    return 1\n";
        assert_eq!(preview_from_source(source, 0).unwrap(), "def f():");
    }

    #[test]
    fn test_signature_spanning_lines() {
        let source = "\
class A:
    def method(
        self,
        other,
    ) -> int:
        return 1
";

        assert_snapshot!(preview_from_source(source, 1).unwrap(), @r"
        def method(
            self,
            other,
        ) -> int:
        ");
    }

    #[test]
    fn test_body_after_balanced_signature_is_left_out() {
        let source = "\
fragment UserFields on User {
  id
  friends(first: 10) {
    name
  }
}
";

        assert_eq!(
            preview_from_source(source, 2).unwrap(),
            "friends(first: 10) {"
        );
    }

    #[test]
    fn test_deeper_lines_are_kept_until_indent_returns() {
        // Explicit escapes: a `\` line continuation would strip the indentation
        let source = "  items = build(\n      1,\n      2,\n  )\n  other = 3\n";

        assert_snapshot!(preview_from_source(source, 0).unwrap(), @r"
        items = build(
            1,
            2,
        )
        ");
    }

    #[test]
    fn test_indented_line_followed_by_outdent_is_previewed_alone() {
        let source = "a\n    b = 1\nc = 2";
        assert_eq!(preview_from_source(source, 1).unwrap(), "b = 1");
    }

    #[test]
    fn test_unbalanced_parens_hit_line_cap() {
        let mut source = String::from("call(\n");
        for i in 0..20 {
            source.push_str(&format!("  arg{i},\n"));
        }
        source.push_str(")\n");

        let preview = preview_from_source(&source, 0).unwrap();

        assert_eq!(preview.lines().count(), MAX_PREVIEW_LINES);
        assert!(preview.starts_with("call("));
        assert!(preview.ends_with("arg8,"));
    }

    #[test]
    fn test_last_line() {
        let source = "a\n  b\n    last(";
        assert_eq!(preview_from_source(source, 2).unwrap(), "last(");
    }

    #[test]
    fn test_row_out_of_bounds() {
        let err = preview_from_source("one\ntwo", 5).unwrap_err();
        assert!(matches!(
            err,
            PreviewError::RowOutOfBounds {
                row: 5,
                line_count: 2
            }
        ));
    }

    #[test]
    fn test_dedent() {
        assert_eq!(dedent("    a\n      b\n    c"), "a\n  b\nc");
        assert_eq!(dedent("\n  a\n   \n  b\n\n"), "a\n\nb");
        assert_eq!(dedent("\ta\n\t\tb"), "a\n\tb");
        // Mixed tabs and spaces only share what is identical
        assert_eq!(dedent("\t a\n\t  b"), "a\n b");
        assert_eq!(dedent("\t a\n  b"), "\t a\n  b");
        assert_eq!(dedent("   "), "");
    }

    #[tokio::test]
    async fn test_extract_preview_from_file() {
        let mut file = NamedTempFile::with_suffix(".graphql").unwrap();
        file.write_all(b"# header\n    query GetUser($id: ID!) {\n      user(id: $id) { id }\n    }\n")
            .unwrap();
        file.flush().unwrap();

        let definition = definition_at(&file.path().display().to_string(), 1);
        let preview = extract_preview(&definition).await.unwrap();

        assert_eq!(preview, "query GetUser($id: ID!) {");
        // Same input, same output
        assert_eq!(extract_preview(&definition).await.unwrap(), preview);
    }

    #[tokio::test]
    async fn test_extract_preview_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.graphql");

        let err = extract_preview(&definition_at(&path.display().to_string(), 0))
            .await
            .unwrap_err();

        assert!(matches!(err, PreviewError::Io(_)));
    }
}
