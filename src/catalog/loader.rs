//! Host-side file handling: find the descriptor in a workspace root, read it,
//! and hand the parsed tree to the builder.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::catalog::builder::build_catalog;
use crate::catalog::document::PackageDocument;
use crate::catalog::error::CatalogError;
use crate::catalog::model::Catalog;

/// File looked up in the workspace root when none is given explicitly.
pub const DEFAULT_SOURCE_FILE: &str = "devices.pdsc";

const PDSC_EXTENSION: &str = "pdsc";

/// List the `.pdsc` files directly inside `root` (no recursion), sorted by path.
pub fn discover_pdsc_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Failed to read directory entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PDSC_EXTENSION))
        })
        .collect();
    files.sort();
    files
}

/// Resolve the descriptor to load from a workspace root.
///
/// `root/file_name` wins when it exists. Otherwise a single `.pdsc` file in
/// the root is accepted as a fallback.
///
/// # Errors
/// [`CatalogError::MissingSourceFile`] when nothing is found, and
/// [`CatalogError::AmbiguousSource`] when several fallback candidates exist.
pub fn locate_source(root: &Path, file_name: &str) -> Result<PathBuf, CatalogError> {
    let preferred = root.join(file_name);
    if preferred.is_file() {
        return Ok(preferred);
    }

    let mut candidates = discover_pdsc_files(root);
    match candidates.len() {
        0 => Err(CatalogError::MissingSourceFile { path: preferred }),
        1 => {
            let found = candidates.remove(0);
            info!(
                "{} not found, using {}",
                preferred.display(),
                found.display()
            );
            Ok(found)
        }
        count => Err(CatalogError::AmbiguousSource {
            root: root.to_path_buf(),
            file_name: file_name.to_string(),
            count,
        }),
    }
}

/// Read and parse a descriptor file without building the catalog.
///
/// # Errors
/// [`CatalogError::MissingSourceFile`] if `path` does not exist, `Io` if it
/// cannot be read, and the XML errors of [`PackageDocument::from_xml`].
pub fn read_document(path: &Path) -> Result<PackageDocument, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::MissingSourceFile {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PackageDocument::from_xml(&content)
}

/// Read, parse and flatten a descriptor file in one go.
///
/// # Errors
/// Any error of [`read_document`] or [`build_catalog`].
pub fn load_catalog(path: &Path) -> Result<(PackageDocument, Catalog), CatalogError> {
    info!("Reading device descriptor from {}", path.display());
    let document = read_document(path)?;
    let catalog = build_catalog(&document)?;
    Ok((document, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"<package><devices><family Dfamily="F"><subFamily DsubFamily="S"><device Dname="D"/></subFamily></family></devices></package>"#;

    #[test]
    fn test_locate_prefers_default_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("devices.pdsc"), VALID).unwrap();
        fs::write(temp_dir.path().join("other.pdsc"), VALID).unwrap();

        let path = locate_source(temp_dir.path(), DEFAULT_SOURCE_FILE).unwrap();
        assert_eq!(path, temp_dir.path().join("devices.pdsc"));
    }

    #[test]
    fn test_locate_falls_back_to_single_candidate() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Keil.STM32F4xx_DFP.pdsc"), VALID).unwrap();
        fs::write(temp_dir.path().join("README.md"), "readme").unwrap();

        let path = locate_source(temp_dir.path(), DEFAULT_SOURCE_FILE).unwrap();
        assert_eq!(path, temp_dir.path().join("Keil.STM32F4xx_DFP.pdsc"));
    }

    #[test]
    fn test_locate_ambiguous_candidates() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.pdsc"), VALID).unwrap();
        fs::write(temp_dir.path().join("b.pdsc"), VALID).unwrap();

        let result = locate_source(temp_dir.path(), DEFAULT_SOURCE_FILE);
        assert!(matches!(
            result,
            Err(CatalogError::AmbiguousSource { count: 2, .. })
        ));
    }

    #[test]
    fn test_locate_missing_reports_default_path() {
        let temp_dir = TempDir::new().unwrap();
        match locate_source(temp_dir.path(), DEFAULT_SOURCE_FILE) {
            Err(CatalogError::MissingSourceFile { path }) => {
                assert_eq!(path, temp_dir.path().join("devices.pdsc"));
            }
            other => panic!("expected MissingSourceFile, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_ignores_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("packs");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.pdsc"), VALID).unwrap();

        assert!(discover_pdsc_files(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devices.pdsc");
        fs::write(&path, VALID).unwrap();

        let (document, catalog) = load_catalog(&path).unwrap();
        assert_eq!(document.root, "package");
        assert_eq!(catalog.device_count(), 1);
    }

    #[test]
    fn test_read_document_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_document(&temp_dir.path().join("nope.pdsc"));
        assert!(matches!(
            result,
            Err(CatalogError::MissingSourceFile { .. })
        ));
    }
}
