//! Notification infrastructure module
//!
//! notify-rust is used everywhere; on Linux, notify-send takes over when
//! notify-rust cannot reach the notification daemon.

mod notify_rust;
mod notify_send;

pub use notify_rust::NotifyRustNotifier;
pub use notify_send::NotifySendNotifier;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Tries `primary`, then `fallback` if the first one fails
pub struct FallbackNotifier<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Notifier, F: Notifier> FallbackNotifier<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: Notifier, F: Notifier> Notifier for FallbackNotifier<P, F> {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        match self.primary.notify(title, message, icon).await {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(error = %e, "primary notifier failed, trying fallback");
                self.fallback.notify(title, message, icon).await
            }
        }
    }
}

/// Notifier that shows nothing (`--no-notify`)
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(
        &self,
        _title: &str,
        _message: &str,
        _icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Create the notifier for this platform, or a silent one when disabled
pub fn create_notifier(enabled: bool) -> Box<dyn Notifier> {
    if !enabled {
        return Box::new(DisabledNotifier);
    }

    #[cfg(target_os = "linux")]
    {
        Box::new(FallbackNotifier::new(
            NotifyRustNotifier::new(),
            NotifySendNotifier::new(),
        ))
    }

    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NotifyRustNotifier::new())
    }
}
