use crate::{ConnectionId, ConnectionInfo};

use relay_config::ProducerPolicy;

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use tokio::sync::{RwLock, oneshot};

/// Tracks live producer connections and applies the producer policy
pub struct ProducerRegistry {
    inner: Arc<RwLock<ProducerInner>>,
    policy: ProducerPolicy,
}

struct ProducerInner {
    producers: HashMap<ConnectionId, ProducerEntry>,
}

struct ProducerEntry {
    info: ConnectionInfo,
    supersede_tx: oneshot::Sender<()>,
}

/// Held by a producer connection for as long as it is registered.
pub struct ProducerLease {
    superseded_rx: Option<oneshot::Receiver<()>>,
}

impl ProducerLease {
    /// Resolves once a newer producer has taken over; pending forever otherwise.
    /// Cancel safe.
    pub async fn superseded(&mut self) {
        if let Some(rx) = self.superseded_rx.as_mut() {
            let result = rx.await;
            self.superseded_rx = None;
            if result.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

impl ProducerRegistry {
    pub fn new(policy: ProducerPolicy) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProducerInner {
                producers: HashMap::new(),
            })),
            policy,
        }
    }

    pub fn policy(&self) -> ProducerPolicy {
        self.policy
    }

    /// Register a producer. Under `Supersede`, every earlier producer is told to close.
    pub async fn register(&self, info: ConnectionInfo) -> ProducerLease {
        let mut inner = self.inner.write().await;

        if self.policy == ProducerPolicy::Supersede {
            for (previous_id, previous) in inner.producers.drain() {
                info!(
                    "Producer {previous_id} ({}) superseded by {}",
                    previous.info.remote(),
                    info.connection_id
                );
                let _ = previous.supersede_tx.send(());
            }
        }

        let connection_id = info.connection_id;
        let (supersede_tx, superseded_rx) = oneshot::channel();
        inner
            .producers
            .insert(connection_id, ProducerEntry { info, supersede_tx });
        info!(
            "Registered producer {connection_id} ({} active)",
            inner.producers.len()
        );

        ProducerLease {
            superseded_rx: Some(superseded_rx),
        }
    }

    /// Remove a producer. Removing an absent (or superseded) producer is a no-op.
    pub async fn unregister(&self, connection_id: ConnectionId) -> bool {
        let mut inner = self.inner.write().await;

        if inner.producers.remove(&connection_id).is_some() {
            info!(
                "Unregistered producer {connection_id} ({} active)",
                inner.producers.len()
            );
            true
        } else {
            false
        }
    }

    pub async fn active_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.producers.len()
    }

    /// Info about every registered producer
    pub async fn active(&self) -> Vec<ConnectionInfo> {
        let inner = self.inner.read().await;
        inner
            .producers
            .values()
            .map(|entry| entry.info.clone())
            .collect()
    }
}

impl Clone for ProducerRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            policy: self.policy,
        }
    }
}
