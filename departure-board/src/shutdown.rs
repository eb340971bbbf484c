//! Process-wide stop signal shared by the refresh task and the UI loop.

use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

/// Cloneable one-way stop flag.
///
/// Can be raised from async code (signal handler) and from the blocking UI
/// thread alike; async tasks can wait on it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Ask everything to stop. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once `trigger` has been called.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this can't see a closed channel
        let _ = rx.wait_for(|stopped| *stopped).await;
    }

    /// Trigger once `signal` resolves successfully.
    ///
    /// A listener that fails to install is logged and leaves the flag
    /// alone, so the board keeps running without that signal.
    pub async fn trigger_on<F>(&self, signal: F)
    where
        F: Future<Output = io::Result<()>>,
    {
        match signal.await {
            Ok(()) => {
                info!("signal received, shutting down");
                self.trigger();
            }
            Err(e) => warn!("failed to listen for shutdown signal: {e}"),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
