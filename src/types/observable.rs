//! Observable state fields and one-shot event queues consumed by a UI layer.
//!
//! [`Observable`] holds the latest value of a piece of state; subscribers get
//! the current value immediately and are woken on every change.
//! [`EventQueue`] delivers each pushed event to exactly one consumer, once.
//! Resubscribing never replays an event that was already taken.

use tokio::sync::{mpsc, watch, Mutex};

/// A state field with a getter and change subscriptions.
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Publishes a new value, waking all subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Subscribes to the field. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// FIFO queue of one-shot events. Taking an event acknowledges it.
pub struct EventQueue<T> {
    tx: mpsc::UnboundedSender<T>,
    rx: Mutex<mpsc::UnboundedReceiver<T>>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    pub fn push(&self, event: T) {
        // The receiver lives as long as `self`, so sending cannot fail.
        let _ = self.tx.send(event);
    }

    /// Waits for the next event and removes it from the queue.
    pub async fn next(&self) -> Option<T> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }

    /// Takes the next pending event without waiting.
    ///
    /// Returns `None` when the queue is empty or another consumer is
    /// currently waiting in [`EventQueue::next`].
    pub fn try_next(&self) -> Option<T> {
        let mut rx = self.rx.try_lock().ok()?;
        rx.try_recv().ok()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
