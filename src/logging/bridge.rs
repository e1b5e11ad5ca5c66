use super::dispatcher::Dispatcher;
use super::level::{Facility, Level};
use std::sync::Arc;

/// forwards `log` crate records into a [`Dispatcher`]
///
/// the record target becomes the logger name
#[derive(Debug, Clone)]
pub struct LogBridge {
    dispatcher: Arc<Dispatcher>,
    facility: Facility,
}

impl LogBridge {
    pub fn new(dispatcher: Arc<Dispatcher>, facility: Facility) -> Self {
        Self {
            dispatcher,
            facility,
        }
    }

    /// install as the `log` crate's global logger
    pub fn install(self, max_level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

pub fn level_from_log(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Err,
        log::Level::Warn => Level::Warning,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.dispatcher.enabled(level_from_log(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = level_from_log(record.level());
        if !self.dispatcher.enabled(level) {
            return;
        }

        let name: Arc<str> = Arc::from(record.target());
        self.dispatcher.dispatch(level, self.facility, &name, record.args());
    }

    fn flush(&self) {}
}
