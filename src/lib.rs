pub mod error;
pub mod logging;
pub mod utils;

pub use error::*;
pub use logging::{
    Dispatcher, Facility, Handler, Level, LogBridge, Logger, Message, PrintHandler,
    format_timestamp_ms,
};
pub use utils::changelog::{ReleaseHeading, ReleaseHeadings, find_latest_release};
pub use utils::config::{LogConfig, ReleaseConfig, UuidLogConfig};
pub use utils::manifest::{DeclaredVersion, ManifestFormat, read_declared_version};
pub use utils::release_check::{CheckOutcome, VersionConsistencyChecker};
