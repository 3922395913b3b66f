use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::signal;
use tokio::sync::watch;

/// Coordinates server shutdown and tracks open connections.
pub struct ShutdownManager {
    signaled: watch::Sender<bool>,
    active_connections: AtomicUsize,
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (signaled, _) = watch::channel(false);
        Self {
            signaled,
            active_connections: AtomicUsize::new(0),
        }
    }

    /// Resolve on Ctrl-C, SIGTERM or [`signal_shutdown`](Self::signal_shutdown),
    /// whichever comes first, and mark shutdown as started.
    pub async fn wait_for_shutdown(&self) -> io::Result<()> {
        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
                _ = self.signaled() => {},
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = self.signaled() => {},
            }
        }

        self.signal_shutdown();
        tracing::info!("Shutting down gracefully...");
        Ok(())
    }

    pub fn signal_shutdown(&self) {
        self.signaled.send_replace(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.signaled.borrow()
    }

    /// Resolve once shutdown has been signaled, immediately if it already was.
    pub async fn signaled(&self) {
        let mut rx = self.signaled.subscribe();
        // The sender lives in self, so the channel cannot close here.
        let _ = rx.wait_for(|signaled| *signaled).await;
    }

    pub fn increment_connections(&self) {
        self.active_connections.fetch_add(1, Ordering::SeqCst);
    }

    pub fn decrement_connections(&self) {
        self.active_connections.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }

    /// Poll until no connection is open or `timeout` elapses.
    pub async fn wait_for_connections(&self, timeout: Duration) {
        tracing::info!(active = self.active_connections(), "Waiting for active connections");

        let start = tokio::time::Instant::now();

        while start.elapsed() < timeout {
            if self.active_connections() == 0 {
                tracing::info!("Server stopped");
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tracing::warn!(
            remaining = self.active_connections(),
            "Forced shutdown after timeout"
        );
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}
