//! Shutdown signal handling for the listener

use std::io;

use tokio::sync::mpsc;
use tracing::info;

/// Resolves once SIGINT or SIGTERM (Ctrl+C elsewhere) is received
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<&'static str>,
}

impl ShutdownSignal {
    /// Install the OS signal handlers
    #[cfg(unix)]
    pub fn install() -> Result<Self, io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (tx, rx) = mpsc::channel(2);

        let mut sigint = signal(SignalKind::interrupt())?;
        let tx_int = tx.clone();
        tokio::spawn(async move {
            sigint.recv().await;
            let _ = tx_int.send("SIGINT").await;
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            let _ = tx.send("SIGTERM").await;
        });

        Ok(Self { receiver: rx })
    }

    /// Install the OS signal handlers
    #[cfg(not(unix))]
    pub fn install() -> Result<Self, io::Error> {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send("Ctrl+C").await;
            }
        });
        Ok(Self { receiver: rx })
    }

    /// Wait for the first signal. Never resolves if every handler is gone.
    pub async fn wait(mut self) {
        match self.receiver.recv().await {
            Some(name) => info!(signal = name, "shutdown signal received"),
            None => std::future::pending().await,
        }
    }
}
