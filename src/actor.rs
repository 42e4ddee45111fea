//! Event plumbing between the host's UI callbacks and the switcher.
//!
//! Events carry the tracing span they were sent from, so handler logs nest
//! under the originating host callback.

use tokio::sync::mpsc;
use tracing::Span;

pub mod switcher;

pub struct Sender<E>(mpsc::UnboundedSender<(Span, E)>);

impl<E> Clone for Sender<E> {
    fn clone(&self) -> Self {
        Sender(self.0.clone())
    }
}

impl<E> Sender<E> {
    /// Send without blocking; returns false when the actor is gone.
    pub fn try_send(&self, event: E) -> bool {
        self.0.send((Span::current(), event)).is_ok()
    }
}

pub struct Receiver<E>(mpsc::UnboundedReceiver<(Span, E)>);

impl<E> Receiver<E> {
    pub async fn recv(&mut self) -> Option<(Span, E)> {
        self.0.recv().await
    }
}

pub fn channel<E>() -> (Sender<E>, Receiver<E>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Sender(tx), Receiver(rx))
}
