//! Mock notifier that records every send for inspection.

use std::sync::Mutex;

use async_trait::async_trait;

use onboard_core::{ErrorKind, NotificationRecord, SourceSystem, SystemError};

use crate::traits::Notifier;

#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<NotificationRecord>>,
    fail_sends: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails, for exercising the degraded path.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<NotificationRecord> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn record(&self, channel: &str, recipient: &str, message: &str) -> Result<(), SystemError> {
        if self.fail_sends {
            return Err(SystemError::new(
                SourceSystem::Notification,
                ErrorKind::Server,
                format!("send_{}", channel),
                "NOTIFY_DOWN",
                "Notification gateway unavailable",
                503,
            ));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(NotificationRecord {
                channel: channel.to_string(),
                recipient: recipient.to_string(),
                message: message.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_slack(&self, channel: &str, message: &str) -> Result<(), SystemError> {
        self.record("slack", channel, message)
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), SystemError> {
        self.record("email", to, &format!("{}\n\n{}", subject, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sends_are_recorded_in_order() {
        let notifier = MockNotifier::new();
        notifier.send_slack("#cs-onboarding", "first").await.unwrap();
        notifier
            .send_email("ops@vendor.example", "subject", "body")
            .await
            .unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].channel, "slack");
        assert_eq!(sent[0].recipient, "#cs-onboarding");
        assert_eq!(sent[1].channel, "email");
        assert!(sent[1].message.starts_with("subject"));
    }

    #[tokio::test]
    async fn failing_notifier_reports_the_gateway() {
        let notifier = MockNotifier::failing();
        let err = notifier.send_slack("#x", "msg").await.unwrap_err();
        assert_eq!(err.system, SourceSystem::Notification);
        assert_eq!(err.code, "NOTIFY_DOWN");
        assert!(notifier.sent().is_empty());
    }
}
