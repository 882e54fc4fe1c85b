//! Notifier seam: anything that can deliver an invite message.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::template::InviteEmail;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Outbound message delivery. No delivery guarantee is observed by callers;
/// the queue logs failures and moves on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &InviteEmail) -> Result<(), NotifyError>;
}

/// Dev/default notifier: logs the message instead of sending it.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &InviteEmail) -> Result<(), NotifyError> {
        info!(to = %message.to, subject = %message.subject, "invite email (log only)");
        Ok(())
    }
}

/// Test notifier that records every delivered message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<InviteEmail>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<InviteEmail> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &InviteEmail) -> Result<(), NotifyError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        Ok(())
    }
}
