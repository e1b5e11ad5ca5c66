use super::dispatcher::Handler;
use super::format::format_timestamp_ms;
use super::message::Message;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

pub const DEFAULT_MAXIMUM_LOG_MESSAGES: usize = 50;

/// days are padded to this width in printed timestamps
const TIMESTAMP_DAYS_WIDTH: usize = 3;

/// queues log messages and prints them to a writer when processed
///
/// the queue is bounded; when full the oldest message is dropped
pub struct PrintHandler<W> {
    writer: Mutex<W>,
    queue: Mutex<VecDeque<Arc<Message>>>,
    maximum_log_messages: usize,
}

impl<W: Write + Send> PrintHandler<W> {
    pub fn new(writer: W) -> Self {
        Self::with_maximum_log_messages(writer, DEFAULT_MAXIMUM_LOG_MESSAGES)
    }

    pub fn with_maximum_log_messages(writer: W, maximum_log_messages: usize) -> Self {
        Self {
            writer: Mutex::new(writer),
            queue: Mutex::new(VecDeque::with_capacity(maximum_log_messages)),
            maximum_log_messages,
        }
    }

    pub fn maximum_log_messages(&self) -> usize {
        self.maximum_log_messages
    }

    /// number of queued messages not yet printed
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// print up to `count` queued messages, oldest first
    ///
    /// returns how many were printed. a message that fails to print is
    /// dropped and the error is returned.
    pub fn process(&self, count: usize) -> io::Result<usize> {
        let mut printed = 0;

        while printed < count {
            // release the queue between messages so logging isn't blocked
            // behind a slow writer
            let message = match self
                .queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
            {
                Some(message) => message,
                None => break,
            };

            let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            write_message(&mut *writer, &message)?;
            printed += 1;
        }

        if printed > 0 {
            self.writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush()?;
        }

        Ok(printed)
    }

    /// print everything queued
    pub fn process_all(&self) -> io::Result<usize> {
        self.process(usize::MAX)
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Handler for PrintHandler<W> {
    fn add_log_message(&self, message: Arc<Message>) {
        if self.maximum_log_messages == 0 {
            return;
        }

        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        while queue.len() >= self.maximum_log_messages {
            queue.pop_front();
        }
        queue.push_back(message);
    }
}

/// `<uptime> <level char> [<name>] <text>` terminated by CRLF, as on a serial console
pub fn write_message<W: Write + ?Sized>(writer: &mut W, message: &Message) -> io::Result<()> {
    write!(
        writer,
        "{} {} [{}] {}\r\n",
        format_timestamp_ms(message.uptime_ms, TIMESTAMP_DAYS_WIDTH),
        message.level.as_char(),
        message.name,
        message.text
    )
}
