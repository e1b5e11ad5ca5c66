// microcontroller-style logging framework

pub mod bridge;
pub mod dispatcher;
pub mod format;
pub mod level;
pub mod logger;
pub mod message;
pub mod print_handler;

pub use bridge::LogBridge;
pub use dispatcher::{Dispatcher, Handler, MAX_LOG_LENGTH};
pub use format::format_timestamp_ms;
pub use level::{Facility, Level};
pub use logger::Logger;
pub use message::Message;
pub use print_handler::{DEFAULT_MAXIMUM_LOG_MESSAGES, PrintHandler, write_message};
