//! Notification channels.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, RwLock},
};

use tracing::info;
use workshop_core::{
    application::{ApplicationError, ports::Notifier},
    domain::{Notice, NotificationReceipt},
    error::WorkshopResult,
};

/// Records the notice as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) -> WorkshopResult<NotificationReceipt> {
        let message = notice.message();
        info!(
            request_id = %notice.request_id,
            recipient = %notice.recipient,
            arrives_on = %notice.arrives_on,
            "{message}"
        );
        Ok(NotificationReceipt {
            channel: "log".into(),
            message,
            delivered: true,
        })
    }
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes the notice as a short letter to a writer, stdout by default.
#[derive(Clone)]
pub struct LetterNotifier {
    out: SharedWriter,
}

impl LetterNotifier {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn write_letter(out: &mut dyn Write, notice: &Notice) -> io::Result<()> {
        let body = notice.body();
        let mut chars = body.chars();
        let first = chars.next().map(|c| c.to_uppercase().collect::<String>());

        writeln!(out, "Dear {},", notice.recipient)?;
        writeln!(out)?;
        writeln!(out, "{}{}", first.unwrap_or_default(), chars.as_str())?;
        writeln!(out)?;
        writeln!(out, "With love from the workshop")?;
        out.flush()
    }
}

impl Default for LetterNotifier {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Notifier for LetterNotifier {
    fn notify(&self, notice: &Notice) -> WorkshopResult<NotificationReceipt> {
        let message = notice.message();
        let mut out = self.out.lock().map_err(|_| ApplicationError::LockPoisoned {
            resource: "letter writer",
        })?;

        Self::write_letter(&mut **out, notice).map_err(|e| {
            ApplicationError::NotificationFailed {
                channel: "letter".into(),
                reason: e.to_string(),
            }
        })?;

        Ok(NotificationReceipt {
            channel: "letter".into(),
            message,
            delivered: true,
        })
    }
}

/// Sends nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, notice: &Notice) -> WorkshopResult<NotificationReceipt> {
        Ok(NotificationReceipt {
            channel: "silent".into(),
            message: notice.message(),
            delivered: false,
        })
    }
}

/// Thread-safe in-memory notifier (for testing).
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    sent: Arc<RwLock<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, in order.
    pub fn sent(&self) -> Vec<Notice> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sent.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: &Notice) -> WorkshopResult<NotificationReceipt> {
        self.sent
            .write()
            .map_err(|_| ApplicationError::LockPoisoned {
                resource: "memory notifier",
            })?
            .push(notice.clone());

        Ok(NotificationReceipt {
            channel: "memory".into(),
            message: notice.message(),
            delivered: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use workshop_core::domain::{Money, RequestId};

    fn notice() -> Notice {
        Notice {
            request_id: RequestId::new(),
            recipient: "Ada".into(),
            item_count: 2,
            total: Money::from_cents(4000),
            discount: Money::from_cents(1000),
            carrier: "sleigh".into(),
            arrives_on: NaiveDate::from_ymd_opt(2026, 12, 4).unwrap(),
        }
    }

    /// Writer that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_notifier_delivers() {
        let receipt = LogNotifier.notify(&notice()).unwrap();
        assert!(receipt.delivered);
        assert_eq!(receipt.channel, "log");
        assert!(receipt.message.contains("You saved $10.00"));
    }

    #[test]
    fn letter_is_written_to_the_writer() {
        let buffer = Buffer::default();
        let receipt = LetterNotifier::new(buffer.clone()).notify(&notice()).unwrap();

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(text.starts_with("Dear Ada,\n\nYour 2 gifts ($40.00)"));
        assert_eq!(text.matches("Dear").count(), 1);
        assert!(text.contains("You saved $10.00"));
        assert_eq!(receipt.message, notice().message());
        assert!(receipt.delivered);
    }

    #[test]
    fn letter_write_failure_is_reported() {
        let err = LetterNotifier::new(Broken).notify(&notice()).unwrap_err();
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn silent_sends_nothing() {
        let receipt = SilentNotifier.notify(&notice()).unwrap();
        assert!(!receipt.delivered);
    }

    #[test]
    fn memory_notifier_keeps_notices() {
        let notifier = MemoryNotifier::new();
        notifier.notify(&notice()).unwrap();
        notifier.notify(&notice()).unwrap();

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.sent()[0].recipient, "Ada");
    }
}
