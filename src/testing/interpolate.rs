//! Command template interpolation
//!
//! Placeholders are `{name}` tokens: an opening brace, the shortest run of
//! characters on the same line, and a closing brace. Every placeholder must
//! resolve to a declared asset. There is no escape syntax, so shell
//! constructs such as `${VAR}` are treated as placeholders too.

use super::assets::{MaterializedAsset, MaterializedAssets};
use crate::common::{Error, Result};

/// A placeholder found in a template
#[derive(Debug, PartialEq, Eq)]
struct Placeholder<'a> {
    /// Byte range of the whole token, braces included
    start: usize,
    end: usize,
    /// Text between the braces
    name: &'a str,
}

/// Find all placeholders in template order
fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = template[pos..].find('{') {
        let start = pos + offset;
        let rest = &template[start + 1..];
        match rest.find(['}', '\n']) {
            Some(close) if rest.as_bytes()[close] == b'}' => {
                let end = start + 1 + close + 1;
                found.push(Placeholder {
                    start,
                    end,
                    name: &rest[..close],
                });
                pos = end;
            }
            // Unterminated on this line; try the next brace
            _ => pos = start + 1,
        }
    }

    found
}

/// Resolve every placeholder in `template` against `assets`
///
/// File assets are replaced with the absolute path of their temporary file,
/// unquoted. String assets are replaced with their content wrapped in
/// double quotes. An unknown name fails with an error carrying the
/// placeholder, the template, and `context` (the scenario's source path).
pub fn interpolate(template: &str, assets: &MaterializedAssets, context: &str) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for placeholder in placeholders(template) {
        let asset = assets
            .get(placeholder.name)
            .ok_or_else(|| Error::missing_asset(placeholder.name, template, context))?;

        out.push_str(&template[last..placeholder.start]);
        match asset {
            MaterializedAsset::File { path, .. } => out.push_str(&path.display().to_string()),
            MaterializedAsset::String { content, .. } => {
                out.push('"');
                out.push_str(content);
                out.push('"');
            }
        }
        last = placeholder.end;
    }

    out.push_str(&template[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::config::Asset;

    fn names(template: &str) -> Vec<&str> {
        placeholders(template).into_iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_find_placeholders() {
        assert_eq!(names("cat {file1} {file2}"), vec!["file1", "file2"]);
        assert_eq!(names("echo hello"), Vec::<&str>::new());
        assert_eq!(names("echo {}"), vec![""]);
        assert_eq!(names("a {{b}"), vec!["{b"]);
        assert_eq!(names("echo ${HOME}"), vec!["HOME"]);
    }

    #[test]
    fn test_placeholders_do_not_span_lines() {
        assert_eq!(names("echo {\n} {x}"), vec!["x"]);
        assert_eq!(names("echo { unterminated"), Vec::<&str>::new());
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let assets = MaterializedAssets::default();
        let out = interpolate("echo foo && exit 42", &assets, "ctx").unwrap();
        assert_eq!(out, "echo foo && exit 42");
    }

    #[test]
    fn test_string_asset_is_quoted() {
        let assets =
            MaterializedAssets::materialize(&[Asset::string("msg", "hello   world")]).unwrap();
        let out = interpolate("echo {msg}!", &assets, "ctx").unwrap();
        assert_eq!(out, "echo \"hello   world\"!");
    }

    #[test]
    fn test_file_asset_is_path() {
        let assets = MaterializedAssets::materialize(&[Asset::file("file1", "x")]).unwrap();
        let path = assets.get("file1").unwrap().path().unwrap().display().to_string();

        let out = interpolate("cat {file1} > {file1}.bak", &assets, "ctx").unwrap();
        assert_eq!(out, format!("cat {} > {}.bak", path, path));
    }

    #[test]
    fn test_missing_asset_names_placeholder() {
        let assets = MaterializedAssets::materialize(&[Asset::string("known", "x")]).unwrap();
        let err = interpolate("echo {known} {unknown}", &assets, "cmdspec/a.yaml").unwrap_err();

        match err {
            Error::MissingAsset {
                placeholder,
                template,
                context,
            } => {
                assert_eq!(placeholder, "unknown");
                assert_eq!(template, "echo {known} {unknown}");
                assert_eq!(context, "cmdspec/a.yaml");
            }
            other => panic!("Expected MissingAsset, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_placeholder_is_an_error() {
        let assets = MaterializedAssets::default();
        assert!(matches!(
            interpolate("echo {}", &assets, "ctx"),
            Err(Error::MissingAsset { .. })
        ));
    }
}
