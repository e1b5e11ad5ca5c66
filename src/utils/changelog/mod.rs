// changelog release heading scanning

pub mod parser;
pub mod types;

pub use parser::{RELEASE_HEADING_PATTERN, ReleaseHeadings, find_latest_release};
pub use types::ReleaseHeading;
