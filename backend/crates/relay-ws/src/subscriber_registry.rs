use crate::{
    ConnectionId, ConnectionLimits, Result as WsErrorResult, SubscriberHandle, WsError,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};
use tokio::sync::RwLock;

/// Live set of subscriber connections, keyed by connection identity
pub struct SubscriberRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
}

struct RegistryInner {
    subscribers: HashMap<ConnectionId, SubscriberHandle>,
}

impl SubscriberRegistry {
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                subscribers: HashMap::new(),
            })),
            limits,
        }
    }

    /// Register a newly accepted subscriber
    pub async fn register(&self, handle: SubscriberHandle) -> WsErrorResult<ConnectionId> {
        let mut inner = self.inner.write().await;

        if inner.subscribers.len() >= self.limits.max_subscribers {
            warn!(
                "Subscriber limit reached: {}/{}",
                inner.subscribers.len(),
                self.limits.max_subscribers
            );
            return Err(WsError::SubscriberLimitExceeded {
                current: inner.subscribers.len(),
                max: self.limits.max_subscribers,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let connection_id = handle.connection_id();
        inner.subscribers.insert(connection_id, handle);
        info!(
            "Registered subscriber {connection_id} ({} total)",
            inner.subscribers.len()
        );

        Ok(connection_id)
    }

    /// Remove a subscriber. Removing an absent subscriber is a no-op.
    pub async fn unregister(&self, connection_id: ConnectionId) -> bool {
        let mut inner = self.inner.write().await;

        if inner.subscribers.remove(&connection_id).is_some() {
            info!(
                "Unregistered subscriber {connection_id} ({} total remaining)",
                inner.subscribers.len()
            );
            true
        } else {
            false
        }
    }

    /// Copy of the current members; later registry changes do not affect it
    pub async fn snapshot(&self) -> Vec<SubscriberHandle> {
        let inner = self.inner.read().await;
        inner.subscribers.values().cloned().collect()
    }

    pub async fn contains(&self, connection_id: ConnectionId) -> bool {
        let inner = self.inner.read().await;
        inner.subscribers.contains_key(&connection_id)
    }

    /// Get total subscriber count, including ones still connecting
    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.subscribers.len()
    }

    /// Subscribers currently able to receive frames
    pub async fn open_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner
            .subscribers
            .values()
            .filter(|handle| handle.state().is_open())
            .count()
    }
}

impl Clone for SubscriberRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
        }
    }
}
