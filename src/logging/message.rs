use super::level::{Facility, Level};
use std::sync::Arc;

/// log message text with timestamp and logger attributes
///
/// created once per logging call and shared by every handler that wants it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// system uptime when the message was logged
    pub uptime_ms: u64,
    pub level: Level,
    pub facility: Facility,
    /// name of the logger used
    pub name: Arc<str>,
    /// formatted text only; handlers add the other attributes when printing
    pub text: String,
}

impl Message {
    pub fn new(
        uptime_ms: u64,
        level: Level,
        facility: Facility,
        name: Arc<str>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            uptime_ms,
            level,
            facility,
            name,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    // handlers that queue messages compare by identity to see whether the
    // front of the queue changed while they were busy
    #[test]
    fn test_identity_not_equality() {
        let name: Arc<str> = Arc::from("logger");
        let message1 = Arc::new(Message::new(1, Level::Info, Facility::Local0, name.clone(), "text"));
        let message2 = Arc::new(Message::new(1, Level::Info, Facility::Local0, name, "text"));

        assert_eq!(*message1, *message2);
        assert!(!Arc::ptr_eq(&message1, &message2));

        let mut messages = VecDeque::new();
        messages.push_back(message1);
        messages.push_back(message2);

        let front = messages.front().unwrap().clone();
        assert!(Arc::ptr_eq(messages.front().unwrap(), &front));
        assert!(!Arc::ptr_eq(messages.back().unwrap(), &front));

        messages.pop_front();
        assert!(!Arc::ptr_eq(messages.front().unwrap(), &front));
    }
}
