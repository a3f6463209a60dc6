use crate::ConnectionId;

/// Outcome of one fan-out, for logging and metrics only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers the frame was queued for
    pub delivered: usize,
    /// Subscribers not in the Open state
    pub skipped: usize,
    /// Subscribers removed because their queue was full or closed
    pub dropped: Vec<ConnectionId>,
}

impl BroadcastReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.dropped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delivered == 0 && self.skipped == 0 && self.dropped.is_empty()
    }
}
