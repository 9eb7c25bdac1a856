//! notify-send notification adapter (Linux)

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};
use crate::application::APP_NAME;

/// notify-send notification adapter
pub struct NotifySendNotifier {
    app_name: String,
}

impl NotifySendNotifier {
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    fn args(&self, title: &str, message: &str, icon: NotificationIcon) -> Vec<String> {
        vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--icon".to_string(),
            icon.icon_name().to_string(),
            "--urgency".to_string(),
            icon.urgency().to_string(),
            "--expire-time".to_string(),
            icon.timeout_ms().to_string(),
            title.to_string(),
            message.to_string(),
        ]
    }
}

impl Default for NotifySendNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifySendNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let status = Command::new("notify-send")
            .args(self.args(title, message, icon))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::NotifySendNotFound
                } else {
                    NotificationError::SendFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(NotificationError::SendFailed(format!(
                "notify-send exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_args_are_low_and_short() {
        let args = NotifySendNotifier::new().args(
            "bettrWrite - Processing",
            "Processing text...",
            NotificationIcon::Processing,
        );
        assert_eq!(
            args,
            [
                "--app-name",
                "bettrWrite",
                "--icon",
                "preferences-system",
                "--urgency",
                "low",
                "--expire-time",
                "2000",
                "bettrWrite - Processing",
                "Processing text...",
            ]
        );
    }
}
