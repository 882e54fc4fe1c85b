//! Fire-and-forget delivery queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::notifier::Notifier;
use crate::template::InviteEmail;

const QUEUE_CAPACITY: usize = 64;

/// Handle for enqueueing invite messages.
///
/// Delivery runs on a background task; neither enqueueing nor delivery
/// failures propagate to the caller. At-least-once delivery is explicitly
/// not guaranteed.
#[derive(Debug, Clone)]
pub struct NotifyQueue {
    tx: mpsc::Sender<InviteEmail>,
}

impl NotifyQueue {
    /// Spawn the delivery worker on the current tokio runtime.
    pub fn spawn(notifier: Arc<dyn Notifier>) -> Self {
        let (tx, mut rx) = mpsc::channel::<InviteEmail>(QUEUE_CAPACITY);

        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if let Err(err) = notifier.send(&message).await {
                    warn!(to = %message.to, error = %err, "invite notification failed");
                }
            }
        });

        Self { tx }
    }

    /// Hand a message to the worker. A full or closed queue drops the
    /// message with a warning.
    pub fn enqueue(&self, message: InviteEmail) {
        if let Err(err) = self.tx.try_send(message) {
            warn!(error = %err, "dropping invite notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hireboard_core::{CompanyId, EmailAddress, UserId};
    use hireboard_membership::{Company, User};

    use crate::notifier::{NotifyError, RecordingNotifier};

    fn test_email() -> InviteEmail {
        let company = Company::new(CompanyId::new(), "acme", "Acme");
        let user = User::new(
            UserId::new(),
            EmailAddress::parse("jane@acme.com").unwrap(),
            "Jane",
            "Doe",
        );
        InviteEmail::invitation(&company, &user, "https://example.com/invite/t/accept")
    }

    async fn eventually<F: Fn() -> bool>(check: F) -> bool {
        for _ in 0..100 {
            if check() {
                return true;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        false
    }

    #[tokio::test]
    async fn enqueued_messages_reach_the_notifier() {
        let notifier = Arc::new(RecordingNotifier::new());
        let queue = NotifyQueue::spawn(notifier.clone());

        queue.enqueue(test_email());

        assert!(eventually(|| notifier.sent().len() == 1).await);
        assert_eq!(notifier.sent()[0].to, "jane@acme.com");
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _message: &InviteEmail) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("smtp down".into()))
        }
    }

    #[tokio::test]
    async fn delivery_failure_does_not_escape_the_queue() {
        let queue = NotifyQueue::spawn(Arc::new(FailingNotifier));

        // Nothing to assert beyond "no panic, enqueue stays cheap".
        queue.enqueue(test_email());
        queue.enqueue(test_email());
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
}
