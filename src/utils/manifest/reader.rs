// manifest reader

use super::types::{DeclaredVersion, ManifestFormat};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// read the declared version from a json or toml manifest
///
/// json manifests (`library.json`) carry a top-level `version`; toml
/// manifests may carry it at the top level or under `[package]`
pub fn read_declared_version<P: AsRef<Path>>(path: P) -> Result<DeclaredVersion> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let format = ManifestFormat::from_path(path);
    log::debug!("reading {:?} manifest {}", format, path.display());

    let version = match format {
        ManifestFormat::Json => json_version(&content, path)?,
        ManifestFormat::Toml => toml_version(&content, path)?,
    };

    Ok(DeclaredVersion::new(version, path.to_path_buf()))
}

fn json_version(content: &str, path: &Path) -> Result<String> {
    let document: serde_json::Value =
        serde_json::from_str(content).map_err(|e| Error::JsonParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    match document.get("version") {
        Some(serde_json::Value::String(version)) => Ok(version.clone()),
        Some(other) => Err(Error::InvalidVersionField {
            path: path.to_path_buf(),
            found: other.to_string(),
        }),
        None => Err(Error::MissingVersion {
            path: path.to_path_buf(),
        }),
    }
}

fn toml_version(content: &str, path: &Path) -> Result<String> {
    let document: toml::Table = toml::from_str(content).map_err(|e| Error::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    // root level first, then package.version for Cargo.toml files
    let field = document.get("version").or_else(|| {
        document
            .get("package")
            .and_then(|p| p.as_table())
            .and_then(|p| p.get("version"))
    });

    match field {
        Some(toml::Value::String(version)) => Ok(version.clone()),
        Some(other) => Err(Error::InvalidVersionField {
            path: path.to_path_buf(),
            found: other.to_string(),
        }),
        None => Err(Error::MissingVersion {
            path: path.to_path_buf(),
        }),
    }
}
