use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    MissingVersion {
        path: PathBuf,
    },
    InvalidVersionField {
        path: PathBuf,
        found: String,
    },
    ChangelogReadError {
        path: PathBuf,
        line: usize,
        source: std::io::Error,
    },
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileReadError { path, source } => {
                write!(f, "failed to read file: {} ({})", path.display(), source)
            }
            Error::JsonParseError { path, source } => {
                write!(
                    f,
                    "failed to parse json file: {} ({})",
                    path.display(),
                    source
                )
            }
            Error::TomlParseError { path, source } => {
                write!(
                    f,
                    "failed to parse toml file: {} ({})",
                    path.display(),
                    source
                )
            }
            Error::MissingVersion { path } => {
                write!(f, "manifest has no version field: {}", path.display())
            }
            Error::InvalidVersionField { path, found } => {
                write!(
                    f,
                    "manifest version is not a string: {} (found {})",
                    path.display(),
                    found
                )
            }
            Error::ChangelogReadError { path, line, source } => {
                write!(
                    f,
                    "failed to read changelog at {}:{} ({})",
                    path.display(),
                    line,
                    source
                )
            }
            Error::IoError(err) => {
                write!(f, "io error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileReadError { source, .. } => Some(source),
            Error::JsonParseError { source, .. } => Some(source),
            Error::TomlParseError { source, .. } => Some(source),
            Error::ChangelogReadError { source, .. } => Some(source),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}
