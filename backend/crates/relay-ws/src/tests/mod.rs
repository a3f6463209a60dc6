mod subscriber_registry;

use crate::{
    ConnectionInfo, ConnectionLimits, ConnectionRole, ConnectionState, Frame,
    SharedConnectionState, SubscriberHandle, SubscriberRegistry,
};

use tokio::sync::mpsc;

/// Subscriber handle plus the queue end a real socket task would drain
pub(crate) fn open_subscriber(capacity: usize) -> (SubscriberHandle, mpsc::Receiver<Frame>) {
    subscriber_in_state(capacity, ConnectionState::Open)
}

pub(crate) fn subscriber_in_state(
    capacity: usize,
    state: ConnectionState,
) -> (SubscriberHandle, mpsc::Receiver<Frame>) {
    let (tx, rx) = mpsc::channel(capacity);
    let info = ConnectionInfo::new(ConnectionRole::Subscriber, None);
    let handle = SubscriberHandle::new(info, SharedConnectionState::new(state), tx);
    (handle, rx)
}

pub(crate) fn registry() -> SubscriberRegistry {
    SubscriberRegistry::new(ConnectionLimits::default())
}
