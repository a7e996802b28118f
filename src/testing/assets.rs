//! Asset materialization
//!
//! File assets become real temporary files for the lifetime of one
//! scenario. String assets are kept as-is and quoted at interpolation time.

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;

use super::config::{Asset, AssetKind};
use crate::common::{Error, Result};

/// Prefix for every temporary asset file
const TEMP_PREFIX: &str = "cmdspec-";

/// An asset ready to be referenced by a command
#[derive(Debug)]
pub enum MaterializedAsset {
    /// Inline text
    String { name: String, content: String },
    /// A temporary file; removed when dropped or cleaned up
    File { name: String, path: TempPath },
}

impl MaterializedAsset {
    pub fn name(&self) -> &str {
        match self {
            MaterializedAsset::String { name, .. } | MaterializedAsset::File { name, .. } => name,
        }
    }

    /// Path of the temporary file, if this is a file asset
    pub fn path(&self) -> Option<&Path> {
        match self {
            MaterializedAsset::File { path, .. } => Some(&**path),
            MaterializedAsset::String { .. } => None,
        }
    }
}

/// The materialized asset set of one scenario
///
/// Owns the temporary files. Dropping the set removes them, so an early
/// return through `?` still releases everything; `cleanup` does the same
/// explicitly and logs failures.
#[derive(Debug, Default)]
pub struct MaterializedAssets {
    assets: Vec<MaterializedAsset>,
}

impl MaterializedAssets {
    /// Materialize declared assets in order
    ///
    /// If one file cannot be created, files created so far are removed
    /// before the error is returned.
    pub fn materialize(assets: &[Asset]) -> Result<Self> {
        let mut materialized = Self::default();
        for asset in assets {
            let entry = match asset.kind {
                AssetKind::String => MaterializedAsset::String {
                    name: asset.name.clone(),
                    content: asset.content.clone(),
                },
                AssetKind::File => MaterializedAsset::File {
                    name: asset.name.clone(),
                    path: create_file(asset).map_err(|source| Error::AssetMaterialize {
                        name: asset.name.clone(),
                        source,
                    })?,
                },
            };
            if let Some(path) = entry.path() {
                tracing::debug!(asset = %asset.name, path = %path.display(), "materialized file asset");
            }
            materialized.assets.push(entry);
        }
        Ok(materialized)
    }

    /// Find an asset by name; the first declared match wins
    pub fn get(&self, name: &str) -> Option<&MaterializedAsset> {
        self.assets.iter().find(|a| a.name() == name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Delete every materialized file
    ///
    /// Best effort: failures are logged and never reported to the caller.
    pub fn cleanup(self) {
        for asset in self.assets {
            if let MaterializedAsset::File { name, path } = asset {
                let shown = path.display().to_string();
                if let Err(e) = path.close() {
                    tracing::warn!(asset = %name, path = %shown, error = %e, "failed to remove asset file");
                }
            }
        }
    }
}

/// Suffix for the temporary file, taken from the asset name's extension
fn file_suffix(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

fn create_file(asset: &Asset) -> std::io::Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(&file_suffix(&asset.name))
        .tempfile_in(std::path::absolute(std::env::temp_dir())?)?;
    file.write_all(asset.content.as_bytes())?;
    file.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o755))?;
    }

    // Close the handle so the file can be executed (avoids ETXTBSY) while
    // keeping delete-on-drop.
    Ok(file.into_temp_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_from_name() {
        assert_eq!(file_suffix("script.sh"), ".sh");
        assert_eq!(file_suffix("data.tar.gz"), ".gz");
        assert_eq!(file_suffix("file1"), "");
        assert_eq!(file_suffix(".hidden"), "");
    }

    #[test]
    fn test_string_asset_passes_through() {
        let set = MaterializedAssets::materialize(&[Asset::string("greeting", "hello world")])
            .unwrap();
        match set.get("greeting").unwrap() {
            MaterializedAsset::String { content, .. } => assert_eq!(content, "hello world"),
            other => panic!("Expected string asset, got {:?}", other),
        }
        assert!(set.get("greeting").unwrap().path().is_none());
    }

    #[test]
    fn test_file_asset_written_and_removed() {
        let set = MaterializedAssets::materialize(&[Asset::file("input.txt", "Lorem ipsum")])
            .unwrap();
        let path = set.get("input.txt").unwrap().path().unwrap().to_path_buf();

        assert!(path.is_absolute());
        assert_eq!(path.extension().unwrap(), "txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Lorem ipsum");

        set.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_asset_without_content_is_empty() {
        let asset: Asset = serde_yaml::from_str("type: file\nname: empty\n").unwrap();
        let set = MaterializedAssets::materialize(&[asset]).unwrap();
        let path = set.get("empty").unwrap().path().unwrap();
        assert_eq!(std::fs::metadata(path).unwrap().len(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_asset_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let set = MaterializedAssets::materialize(&[Asset::file("run.sh", "echo hi\n")]).unwrap();
        let path = set.get("run.sh").unwrap().path().unwrap();
        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_ne!(mode & 0o100, 0);
    }

    #[test]
    fn test_cleanup_tolerates_already_removed_file() {
        let set = MaterializedAssets::materialize(&[Asset::file("gone.txt", "x")]).unwrap();
        let path = set.get("gone.txt").unwrap().path().unwrap().to_path_buf();
        std::fs::remove_file(&path).unwrap();

        set.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_files() {
        let set = MaterializedAssets::materialize(&[Asset::file("a", "x")]).unwrap();
        let path = set.get("a").unwrap().path().unwrap().to_path_buf();
        drop(set);
        assert!(!path.exists());
    }

    #[test]
    fn test_first_declared_match_wins() {
        let set = MaterializedAssets::materialize(&[
            Asset::string("dup", "first"),
            Asset::string("dup", "second"),
        ])
        .unwrap();
        match set.get("dup").unwrap() {
            MaterializedAsset::String { content, .. } => assert_eq!(content, "first"),
            other => panic!("Expected string asset, got {:?}", other),
        }
        assert_eq!(set.len(), 2);
    }
}
