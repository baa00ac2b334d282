//! Progress plumbing between the pipeline and its front end.
//!
//! The scanner, the fingerprint workers and the comparator all hold an
//! [`EventSender`]. The CLI drains the matching [`EventReceiver`] on its own
//! thread until every sender is gone.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sending half handed to each pipeline stage.
///
/// Cloned freely into rayon workers. A send never blocks and never fails:
/// once the receiver is gone, events are dropped.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receiving half, owned by whoever renders progress.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Yields events in arrival order; ends when all senders are dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

pub struct EventChannel;

impl EventChannel {
    /// Unbounded, so fingerprint workers never wait on a slow progress bar
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// Sender with no listener, used by `scan` and `run` without events.
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}
