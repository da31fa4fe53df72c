//! Stop signal shared by the HTTP server and `main`.

use tokio::sync::broadcast;

/// One-shot stop broadcast.
///
/// `main` hands a receiver to `HttpServer::run` and triggers it from the
/// signal task. The server then stops accepting connections and lets
/// in-flight processing requests finish. Integration tests trigger it
/// directly to stop a server started on an ephemeral port.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver for `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed server to stop. No-op when nothing is listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Servers (or other tasks) that have not dropped their receiver.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
