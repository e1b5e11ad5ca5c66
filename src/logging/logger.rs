use super::dispatcher::{Dispatcher, MAX_LOG_LENGTH};
use super::level::{Facility, Level};
use std::fmt;
use std::sync::Arc;

/// named source of log messages with a default facility
///
/// ```
/// use std::sync::Arc;
/// use uuid_log::logging::{Dispatcher, Facility, Logger};
///
/// let dispatcher = Arc::new(Dispatcher::new());
/// let logger = Logger::with_dispatcher("setup", Facility::Local0, dispatcher);
/// logger.info(format_args!("Hello, {} World!", 42));
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    name: Arc<str>,
    facility: Facility,
    dispatcher: Arc<Dispatcher>,
}

impl Logger {
    pub const MAX_LOG_LENGTH: usize = MAX_LOG_LENGTH;

    /// logger on the process-wide dispatcher
    pub fn new(name: impl Into<Arc<str>>, facility: Facility) -> Self {
        Self::with_dispatcher(name, facility, Dispatcher::global())
    }

    pub fn with_dispatcher(
        name: impl Into<Arc<str>>,
        facility: Facility,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            name: name.into(),
            facility,
            dispatcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn facility(&self) -> Facility {
        self.facility
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.dispatcher.enabled(level)
    }

    pub fn emerg(&self, text: impl fmt::Display) {
        self.log(Level::Emerg, self.facility, text);
    }

    pub fn alert(&self, text: impl fmt::Display) {
        self.log(Level::Alert, self.facility, text);
    }

    pub fn crit(&self, text: impl fmt::Display) {
        self.log(Level::Crit, self.facility, text);
    }

    pub fn err(&self, text: impl fmt::Display) {
        self.log(Level::Err, self.facility, text);
    }

    pub fn warning(&self, text: impl fmt::Display) {
        self.log(Level::Warning, self.facility, text);
    }

    pub fn notice(&self, text: impl fmt::Display) {
        self.log(Level::Notice, self.facility, text);
    }

    pub fn info(&self, text: impl fmt::Display) {
        self.log(Level::Info, self.facility, text);
    }

    pub fn debug(&self, text: impl fmt::Display) {
        self.log(Level::Debug, self.facility, text);
    }

    pub fn trace(&self, text: impl fmt::Display) {
        self.log(Level::Trace, self.facility, text);
    }

    /// log with an explicit level and facility; OFF and ALL are clamped to
    /// EMERG and TRACE
    pub fn log(&self, level: Level, facility: Facility, text: impl fmt::Display) {
        self.dispatcher.dispatch(level, facility, &self.name, text);
    }
}
