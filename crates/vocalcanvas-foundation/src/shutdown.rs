//! Graceful shutdown signaling
//!
//! Installs OS signal handlers once and hands out a cloneable signal that
//! long-running tasks can await.

use tokio::signal;
use tokio::sync::watch;
use tracing::info;

pub struct ShutdownHandler;

impl ShutdownHandler {
    pub fn new() -> Self {
        Self
    }

    /// Install SIGINT/SIGTERM handlers and return the signal half.
    pub fn install(self) -> ShutdownSignal {
        let (tx, rx) = watch::channel(false);

        tokio::spawn(async move {
            wait_for_os_signal().await;
            info!("Shutdown signal received");
            let _ = tx.send(true);
            // Keep the sender alive so late subscribers still observe the flag.
            tx.closed().await;
        });

        ShutdownSignal { rx }
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown has been requested.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        if *rx.borrow() {
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }
}

async fn wait_for_os_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
