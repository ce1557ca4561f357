//! User notification sinks.

use crate::error::NotifyError;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Something that can show notifications to the user
pub trait Notifier: Send + Sync {
    /// False when the user turned notifications off
    fn is_enabled(&self) -> bool {
        true
    }

    fn is_permission_granted(&self) -> impl Future<Output = bool> + Send;

    fn request_permission(&self) -> impl Future<Output = Permission> + Send;

    fn send_notification(
        &self,
        title: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Hands notifications to the TUI, which shows them as a banner.
///
/// Permission is granted on first request unless notifications are disabled.
#[derive(Debug)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
    enabled: bool,
    granted: AtomicBool,
}

impl ChannelNotifier {
    pub fn new(sender: UnboundedSender<Notification>, enabled: bool) -> Self {
        Self {
            sender,
            enabled,
            granted: AtomicBool::new(false),
        }
    }
}

impl Notifier for ChannelNotifier {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn is_permission_granted(&self) -> bool {
        self.granted.load(Ordering::Acquire)
    }

    async fn request_permission(&self) -> Permission {
        if self.enabled {
            self.granted.store(true, Ordering::Release);
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    async fn send_notification(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.sender
            .send(Notification {
                title: title.to_string(),
                body: body.to_string(),
            })
            .map_err(|_| NotifyError::Dispatch("notification receiver closed".to_string()))
    }
}

/// Prints notifications to stdout, for headless runs
#[derive(Debug)]
pub struct LogNotifier {
    enabled: bool,
}

impl LogNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for LogNotifier {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn is_permission_granted(&self) -> bool {
        self.enabled
    }

    async fn request_permission(&self) -> Permission {
        if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    async fn send_notification(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        info!(title, body, "notification");
        println!("[notify] {title}: {body}");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn channel_notifier_grants_on_request_and_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = ChannelNotifier::new(tx, true);

        assert!(!notifier.is_permission_granted().await);
        assert_eq!(notifier.request_permission().await, Permission::Granted);
        assert!(notifier.is_permission_granted().await);

        notifier.send_notification("Title", "Body").await.unwrap();
        let received = rx.recv().await.unwrap();
        assert_eq!(received.title, "Title");
        assert_eq!(received.body, "Body");
    }

    #[tokio::test]
    async fn disabled_channel_notifier_denies() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let notifier = ChannelNotifier::new(tx, false);

        assert!(!notifier.is_enabled());
        assert_eq!(notifier.request_permission().await, Permission::Denied);
        assert!(!notifier.is_permission_granted().await);
    }

    #[test]
    fn enabled_flag_follows_construction() {
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(ChannelNotifier::new(tx, true).is_enabled());
        assert!(LogNotifier::new(true).is_enabled());
        assert!(!LogNotifier::new(false).is_enabled());
    }

    #[tokio::test]
    async fn closed_channel_is_a_dispatch_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let notifier = ChannelNotifier::new(tx, true);

        let err = notifier.send_notification("t", "b").await.unwrap_err();
        assert!(matches!(err, NotifyError::Dispatch(_)));
    }
}
