// manifest data structures

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// structured data format of a manifest file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    /// guess the format from the file extension, json unless it ends in `.toml`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ManifestFormat::Toml,
            _ => ManifestFormat::Json,
        }
    }
}

/// the authoritative version declared by a project manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredVersion {
    pub version: String,
    pub path: PathBuf,
}

impl DeclaredVersion {
    pub fn new(version: impl Into<String>, path: PathBuf) -> Self {
        Self {
            version: version.into(),
            path,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.version
    }

    /// parse as semver, only used for diagnostics
    pub fn semver(&self) -> Option<Version> {
        Version::parse(&self.version).ok()
    }
}

impl fmt::Display for DeclaredVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}
