// manifest reading

pub mod reader;
pub mod types;

pub use reader::read_declared_version;
pub use types::{DeclaredVersion, ManifestFormat};
