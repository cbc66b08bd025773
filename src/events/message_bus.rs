//! # Message Bus
//!
//! A small typed pub/sub bus over `std::sync::mpsc` channels. The schema store
//! and the live form publish their change notifications through it; the UI
//! side holds [`Consumer`]s and drains them at its own pace.
//!
//! ## Usage Example
//! ```rust
//! use schemaform::events::{MessageBus, SelectionChanged};
//!
//! let bus = MessageBus::new();
//! let mut receiver = bus.subscribe::<SelectionChanged>();
//!
//! bus.publish(SelectionChanged { node_id: Some("root".to_string()) }).unwrap();
//!
//! if let Ok(event) = receiver.try_recv() {
//!     println!("Received event: {:?}", event);
//! }
//! ```

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::event_types::EventType;

/// Errors that can occur within the message bus system
#[derive(Error, Debug)]
pub enum MessageBusError {
    /// The subscriber registry lock was poisoned by a panicking holder
    #[error("Subscriber registry unavailable for event type: {event_type}")]
    RegistryPoisoned { event_type: String },
}

/// Result type for message bus operations
pub type MessageBusResult<T> = Result<T, MessageBusError>;

/// Consumer handle for receiving events of a specific type
pub struct Consumer<T: EventType> {
    receiver: Receiver<T>,
}

impl<T: EventType> Consumer<T> {
    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<T, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive an event, blocking until one is available
    pub fn recv(&mut self) -> Result<T, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Drain every event currently queued
    pub fn drain(&mut self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Try to receive an event with a timeout
    pub fn recv_timeout(&mut self, timeout: std::time::Duration) -> Result<T, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Internal registry for managing event subscribers
struct SubscriberRegistry {
    // Key: event type name, Value: list of boxed senders
    subscribers: HashMap<&'static str, Vec<Box<dyn std::any::Any + Send>>>,
}

impl SubscriberRegistry {
    fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    fn add_subscriber<T: EventType>(&mut self, sender: Sender<T>) {
        self.subscribers
            .entry(T::type_id())
            .or_default()
            .push(Box::new(sender));
    }

    /// Send to every live subscriber, dropping the ones whose consumer is gone.
    fn deliver<T: EventType>(&mut self, event: &T) -> usize {
        let Some(senders) = self.subscribers.get_mut(T::type_id()) else {
            return 0;
        };
        senders.retain(|boxed| {
            boxed
                .downcast_ref::<Sender<T>>()
                .is_some_and(|sender| sender.send(event.clone()).is_ok())
        });
        senders.len()
    }

    fn count<T: EventType>(&self) -> usize {
        self.subscribers
            .get(T::type_id())
            .map(|senders| senders.len())
            .unwrap_or_default()
    }
}

/// Main message bus for event-driven communication
#[derive(Clone)]
pub struct MessageBus {
    registry: Arc<Mutex<SubscriberRegistry>>,
}

impl MessageBus {
    /// Create a new message bus instance
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(SubscriberRegistry::new())),
        }
    }

    /// Subscribe to events of a specific type
    /// Returns a Consumer that can be used to receive events
    pub fn subscribe<T: EventType>(&self) -> Consumer<T> {
        let (sender, receiver) = mpsc::channel();
        let mut registry = self
            .registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        registry.add_subscriber(sender);
        Consumer { receiver }
    }

    /// Publish an event to all subscribers of that event type
    ///
    /// Returns the number of subscribers that received it. Having no
    /// subscribers is not an error.
    pub fn publish<T: EventType>(&self, event: T) -> MessageBusResult<usize> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| MessageBusError::RegistryPoisoned {
                event_type: T::type_id().to_string(),
            })?;
        Ok(registry.deliver(&event))
    }

    /// Get the number of subscribers for a given event type
    pub fn subscriber_count<T: EventType>(&self) -> usize {
        self.registry
            .lock()
            .map(|registry| registry.count::<T>())
            .unwrap_or_default()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
