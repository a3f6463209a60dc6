use crate::{BroadcastReport, Frame, Metrics, MetricsTimer, SubscriberRegistry, WsError};

use log::{debug, warn};

/// Forwards producer frames to every open subscriber
#[derive(Clone)]
pub struct BroadcastEngine {
    registry: SubscriberRegistry,
    metrics: Metrics,
}

impl BroadcastEngine {
    pub fn new(registry: SubscriberRegistry, metrics: Metrics) -> Self {
        Self { registry, metrics }
    }

    pub fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Queue `frame` for every subscriber in the current snapshot.
    ///
    /// Never waits on a subscriber: a full queue means the subscriber is too
    /// slow and it is dropped, a closed queue means it is already gone. Either
    /// way the remaining subscribers still get the frame.
    pub async fn broadcast(&self, frame: &Frame) -> BroadcastReport {
        let timer = MetricsTimer::new(self.metrics.clone());
        let subscribers = self.registry.snapshot().await;
        let mut report = BroadcastReport::default();

        for subscriber in &subscribers {
            if !subscriber.state().is_open() {
                report.skipped += 1;
                self.metrics.frame_skipped();
                continue;
            }

            match subscriber.try_send(frame.clone()) {
                Ok(()) => {
                    report.delivered += 1;
                    self.metrics.frame_queued();
                }
                Err(e) => {
                    match e {
                        WsError::SendBufferFull { .. } => {
                            subscriber.state().begin_closing();
                        }
                        _ => subscriber.state().mark_closed(),
                    }
                    warn!(
                        "Dropping subscriber {} ({}): {}",
                        subscriber.connection_id(),
                        subscriber.info().remote(),
                        e
                    );
                    self.metrics.subscriber_dropped(e.error_code());
                    report.dropped.push(subscriber.connection_id());
                }
            }
        }

        // Drop our clones of the senders before unregistering so a dropped
        // subscriber's queue closes as soon as the registry lets go of it.
        drop(subscribers);
        for connection_id in &report.dropped {
            self.registry.unregister(*connection_id).await;
        }

        debug!(
            "Broadcast {} frame ({} bytes): delivered={} skipped={} dropped={}",
            frame.kind(),
            frame.len(),
            report.delivered,
            report.skipped,
            report.dropped.len()
        );

        self.metrics.broadcast_completed(report.delivered);
        timer.finish();

        report
    }
}
