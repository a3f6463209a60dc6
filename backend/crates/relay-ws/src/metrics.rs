use crate::ConnectionRole;

use metrics::{counter, gauge, histogram};

/// Metrics collector for relay operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "relay_ws" }
    }

    /// Record new connection established
    pub fn connection_established(&self, role: ConnectionRole) {
        counter!(format!("{}.connections.established.{}", self.prefix, role)).increment(1);
        gauge!(format!("{}.connections.active.{}", self.prefix, role)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, role: ConnectionRole, reason: &str) {
        counter!(format!("{}.connections.closed.{}", self.prefix, role)).increment(1);
        counter!(format!("{}.connections.closed.reason.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active.{}", self.prefix, role)).decrement(1.0);
    }

    /// Record frame received from a producer
    pub fn frame_received(&self, kind: &str, bytes: usize) {
        counter!(format!("{}.frames.received", self.prefix)).increment(1);
        counter!(format!("{}.frames.received.{}", self.prefix, kind)).increment(1);
        counter!(format!("{}.bytes.received", self.prefix)).increment(bytes as u64);
    }

    /// Record frame queued for a subscriber
    pub fn frame_queued(&self) {
        counter!(format!("{}.frames.queued", self.prefix)).increment(1);
    }

    /// Record frame written to a subscriber socket
    pub fn frame_written(&self, bytes: usize) {
        counter!(format!("{}.frames.written", self.prefix)).increment(1);
        counter!(format!("{}.bytes.written", self.prefix)).increment(bytes as u64);
    }

    /// Record subscriber skipped because it was not open
    pub fn frame_skipped(&self) {
        counter!(format!("{}.frames.skipped", self.prefix)).increment(1);
    }

    /// Record subscriber removed during a broadcast
    pub fn subscriber_dropped(&self, reason: &str) {
        counter!(format!("{}.subscribers.dropped", self.prefix)).increment(1);
        counter!(format!("{}.subscribers.dropped.{}", self.prefix, reason)).increment(1);
    }

    /// Record completed fan-out
    pub fn broadcast_completed(&self, fanout: usize) {
        counter!(format!("{}.broadcast.completed", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.fanout", self.prefix)).set(fanout as f64);
    }

    /// Record fan-out latency
    pub fn broadcast_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.broadcast.latency_us", self.prefix))
            .record(duration.as_micros() as f64);
    }

    /// Record producer closed in favor of a newer one
    pub fn producer_superseded(&self) {
        counter!(format!("{}.producers.superseded", self.prefix)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
