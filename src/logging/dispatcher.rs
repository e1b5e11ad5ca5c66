use super::level::{Facility, Level};
use super::message::Message;
use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use std::time::Instant;

/// maximum length of any log message text in bytes
pub const MAX_LOG_LENGTH: usize = 255;

/// receives log messages from a [`Dispatcher`]
///
/// implementations should queue the message rather than do slow work here,
/// so logging has minimal impact at the call site. queues should be bounded
/// and drop the oldest message when full.
pub trait Handler: Send + Sync {
    fn add_log_message(&self, message: Arc<Message>);
}

type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

struct Registration {
    handler: Arc<dyn Handler>,
    level: Level,
}

fn address<H: ?Sized>(handler: &Arc<H>) -> *const () {
    Arc::as_ptr(handler).cast()
}

static GLOBAL: LazyLock<Arc<Dispatcher>> = LazyLock::new(|| Arc::new(Dispatcher::new()));

/// fans messages out to registered handlers, each with its own minimum level
pub struct Dispatcher {
    handlers: RwLock<Vec<Registration>>,
    level: AtomicI8,
    clock: Clock,
}

impl Dispatcher {
    /// dispatcher stamping messages with milliseconds since its creation
    pub fn new() -> Self {
        let start = Instant::now();
        Self::with_clock(move || start.elapsed().as_millis() as u64)
    }

    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        Self {
            handlers: RwLock::new(Vec::new()),
            level: AtomicI8::new(Level::Off as i8),
            clock: Box::new(clock),
        }
    }

    /// the process-wide dispatcher used by [`super::Logger::new`]
    pub fn global() -> Arc<Dispatcher> {
        GLOBAL.clone()
    }

    /// register a handler, or change the level of one already registered
    pub fn register_handler(&self, handler: Arc<dyn Handler>, level: Level) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);

        let existing = handlers
            .iter()
            .position(|r| std::ptr::eq(address(&r.handler), address(&handler)));

        match existing {
            Some(index) => handlers[index].level = level,
            None => handlers.push(Registration { handler, level }),
        }

        self.refresh_log_level(&handlers);
    }

    /// safe to call with a handler that isn't registered
    pub fn unregister_handler<H: Handler + ?Sized>(&self, handler: &Arc<H>) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        handlers.retain(|r| !std::ptr::eq(address(&r.handler), address(handler)));
        self.refresh_log_level(&handlers);
    }

    /// level of a handler, OFF if it isn't registered
    pub fn get_log_level<H: Handler + ?Sized>(&self, handler: &Arc<H>) -> Level {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| std::ptr::eq(address(&r.handler), address(handler)))
            .map(|r| r.level)
            .unwrap_or(Level::Off)
    }

    /// most verbose level wanted by any handler
    pub fn level(&self) -> Level {
        let value = self.level.load(Ordering::Relaxed);
        Level::ALL_LEVELS
            .iter()
            .copied()
            .find(|l| *l as i8 == value)
            .unwrap_or(Level::Off)
    }

    /// whether any registered handler wants messages at this level
    pub fn enabled(&self, level: Level) -> bool {
        (level as i8) <= self.level.load(Ordering::Relaxed)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// timestamp a message and hand it to every handler that wants its level
    ///
    /// OFF and ALL are clamped to EMERG and TRACE, text is cut to
    /// [`MAX_LOG_LENGTH`] bytes and empty text is dropped. returns the number
    /// of handlers that received the message
    pub fn dispatch(
        &self,
        level: Level,
        facility: Facility,
        name: &Arc<str>,
        text: impl fmt::Display,
    ) -> usize {
        let level = level.clamp_to_message();
        if !self.enabled(level) {
            return 0;
        }

        let text = format_text(text);
        if text.is_empty() {
            return 0;
        }

        let uptime_ms = (self.clock)();
        let message = Arc::new(Message::new(uptime_ms, level, facility, name.clone(), text));

        // handlers run outside the lock so they may register or unregister
        let recipients: Vec<Arc<dyn Handler>> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| level <= r.level)
            .map(|r| r.handler.clone())
            .collect();

        for handler in &recipients {
            handler.add_log_message(message.clone());
        }

        recipients.len()
    }

    fn refresh_log_level(&self, handlers: &[Registration]) {
        let level = handlers
            .iter()
            .map(|r| r.level)
            .max()
            .unwrap_or(Level::Off);
        self.level.store(level as i8, Ordering::Relaxed);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

/// `fmt::Write` sink that keeps at most `limit` bytes, cut on a char boundary
struct BoundedText {
    text: String,
    limit: usize,
}

impl fmt::Write for BoundedText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit - self.text.len();
        if s.len() <= room {
            self.text.push_str(s);
        } else {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.text.push_str(&s[..end]);
            self.limit = self.text.len();
        }
        Ok(())
    }
}

/// render message text, truncated to [`MAX_LOG_LENGTH`] bytes
fn format_text(text: impl fmt::Display) -> String {
    let mut bounded = BoundedText {
        text: String::new(),
        limit: MAX_LOG_LENGTH,
    };
    // BoundedText never fails; an error here comes from a Display impl
    if write!(bounded, "{}", text).is_err() {
        log::trace!("log message formatting failed, keeping partial text");
    }
    bounded.text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicU64;

    #[derive(Default)]
    struct Capture {
        messages: Mutex<Vec<Arc<Message>>>,
    }

    impl Handler for Capture {
        fn add_log_message(&self, message: Arc<Message>) {
            self.messages.lock().unwrap().push(message);
        }
    }

    fn counting_dispatcher() -> Dispatcher {
        let ticks = AtomicU64::new(0);
        Dispatcher::with_clock(move || ticks.fetch_add(1, Ordering::Relaxed) + 1)
    }

    #[test]
    fn test_no_handlers_means_off() {
        let dispatcher = counting_dispatcher();
        assert_eq!(dispatcher.level(), Level::Off);
        assert!(!dispatcher.enabled(Level::Emerg));
        assert!(dispatcher.enabled(Level::Off));
    }

    #[test]
    fn test_aggregate_level_is_most_verbose() {
        let dispatcher = counting_dispatcher();
        let quiet = Arc::new(Capture::default());
        let chatty = Arc::new(Capture::default());

        dispatcher.register_handler(quiet.clone(), Level::Warning);
        assert_eq!(dispatcher.level(), Level::Warning);

        dispatcher.register_handler(chatty.clone(), Level::Debug);
        assert_eq!(dispatcher.level(), Level::Debug);
        assert!(dispatcher.enabled(Level::Debug));
        assert!(!dispatcher.enabled(Level::Trace));

        dispatcher.unregister_handler(&chatty);
        assert_eq!(dispatcher.level(), Level::Warning);

        dispatcher.unregister_handler(&quiet);
        assert_eq!(dispatcher.level(), Level::Off);
        assert_eq!(dispatcher.handler_count(), 0);
    }

    #[test]
    fn test_register_again_changes_level() {
        let dispatcher = counting_dispatcher();
        let handler = Arc::new(Capture::default());

        dispatcher.register_handler(handler.clone(), Level::Info);
        dispatcher.register_handler(handler.clone(), Level::Notice);

        assert_eq!(dispatcher.handler_count(), 1);
        assert_eq!(dispatcher.get_log_level(&handler), Level::Notice);
    }

    #[test]
    fn test_unknown_handler() {
        let dispatcher = counting_dispatcher();
        let handler = Arc::new(Capture::default());

        assert_eq!(dispatcher.get_log_level(&handler), Level::Off);
        dispatcher.unregister_handler(&handler);
        assert_eq!(dispatcher.handler_count(), 0);
    }

    #[test]
    fn test_dispatch_filters_by_handler_level() {
        let dispatcher = counting_dispatcher();
        let info = Arc::new(Capture::default());
        let err = Arc::new(Capture::default());
        dispatcher.register_handler(info.clone(), Level::Info);
        dispatcher.register_handler(err.clone(), Level::Err);

        let name: Arc<str> = Arc::from("test");
        let delivered = dispatcher.dispatch(Level::Notice, Facility::Daemon, &name, "hi");

        assert_eq!(delivered, 1);
        let messages = info.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].uptime_ms, 1);
        assert_eq!(messages[0].facility, Facility::Daemon);
        assert_eq!(&*messages[0].name, "test");
        assert!(err.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_off_handler_never_receives_messages() {
        let dispatcher = counting_dispatcher();
        let off = Arc::new(Capture::default());
        dispatcher.register_handler(off.clone(), Level::Off);

        let name: Arc<str> = Arc::from("kernel");
        for level in Level::ALL_LEVELS {
            assert_eq!(dispatcher.dispatch(level, Facility::Kern, &name, "x"), 0);
        }

        assert!(off.messages.lock().unwrap().is_empty());
        assert_eq!(dispatcher.level(), Level::Off);
    }

    #[test]
    fn test_dispatch_keeps_message_rules() {
        let dispatcher = counting_dispatcher();
        let all = Arc::new(Capture::default());
        dispatcher.register_handler(all.clone(), Level::All);

        let name: Arc<str> = Arc::from("raw");
        let long = "x".repeat(1000);
        assert_eq!(dispatcher.dispatch(Level::Off, Facility::Kern, &name, &long), 1);
        assert_eq!(dispatcher.dispatch(Level::All, Facility::Kern, &name, "all"), 1);
        assert_eq!(dispatcher.dispatch(Level::Info, Facility::Kern, &name, ""), 0);

        let messages = all.messages.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, Level::Emerg);
        assert_eq!(messages[0].text.len(), MAX_LOG_LENGTH);
        assert_eq!(messages[1].level, Level::Trace);
        // the dropped empty message never read the clock
        assert_eq!(messages[1].uptime_ms, 2);
    }

    #[test]
    fn test_format_text_truncates_on_char_boundary() {
        assert_eq!(format_text("short"), "short");

        let long = "x".repeat(300);
        assert_eq!(format_text(&long).len(), MAX_LOG_LENGTH);

        // 254 ascii bytes then a 2 byte char that would straddle the limit
        let straddle = format!("{}é{}", "a".repeat(254), "tail");
        let text = format_text(&straddle);
        assert_eq!(text.len(), 254);
        assert!(text.chars().all(|c| c == 'a'));

        let pieces = format_text(format_args!("{}{}", "b".repeat(200), "c".repeat(200)));
        assert_eq!(pieces.len(), MAX_LOG_LENGTH);
        assert!(pieces.ends_with('c'));
    }
}
