//! `hireboard-notify` — outbound invite notifications.
//!
//! The invite operation treats notification as fire-and-forget: the message
//! is handed to a queue and the operation's outcome never depends on
//! delivery. Failures are logged, not propagated.

pub mod notifier;
pub mod queue;
pub mod template;

pub use notifier::{LogNotifier, Notifier, NotifyError, RecordingNotifier};
pub use queue::NotifyQueue;
pub use template::InviteEmail;
