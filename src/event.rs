//! Lifecycle events published by [PandoraClient](crate::client::PandoraClient).
//!
//! Subscribe with [PandoraClient::subscribe](crate::client::PandoraClient::subscribe). Events are delivered after the
//! operation that triggered them completes. A subscriber that falls more than the channel's capacity behind loses the
//! oldest events, see [tokio::sync::broadcast].

use log::trace;
use tokio::sync::broadcast;

pub const TOPIC_READY: &str = "ready";
pub const TOPIC_DEBUG: &str = "debug";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event {
    /// The client logged in and its user is available.
    Ready,
    /// Free-form trace information, such as the URL of every API request.
    Debug(String),
}

impl Event {
    /// The name of the topic this event belongs to.
    pub fn topic(&self) -> &'static str {
        match self {
            Event::Ready => TOPIC_READY,
            Event::Debug(_) => TOPIC_DEBUG,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventPublisher {
    tx: broadcast::Sender<Event>,
}

impl EventPublisher {
    /// A zero capacity is bumped to one since a broadcast channel can't be empty.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event to every current subscriber. Having no subscribers is fine.
    pub fn publish(&self, event: Event) {
        if let Ok(count) = self.tx.send(event) {
            trace!("Published event to {count} subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics() {
        assert_eq!(Event::Ready.topic(), "ready");
        assert_eq!(Event::Debug("x".to_owned()).topic(), "debug");
    }

    #[test]
    fn subscribers_get_events_published_after_subscribing() {
        let publisher = EventPublisher::new(0);
        publisher.publish(Event::Debug("nobody is listening".to_owned()));

        let mut rx = publisher.subscribe();
        publisher.publish(Event::Ready);

        assert_eq!(rx.try_recv().ok(), Some(Event::Ready));
        assert!(rx.try_recv().is_err());
    }
}
