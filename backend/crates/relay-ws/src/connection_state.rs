use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::Notify;

/// Lifecycle of a relay connection.
///
/// A subscriber only receives frames while `Open`. `Closing` is entered when the
/// relay gives up on a subscriber (send queue overflow) or shutdown begins;
/// `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connecting,
            1 => Self::Open,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// Connection state shared between a connection task and the registry.
#[derive(Debug, Clone)]
pub struct SharedConnectionState(Arc<StateCell>);

#[derive(Debug)]
struct StateCell {
    value: AtomicU8,
    changed: Notify,
}

impl SharedConnectionState {
    pub fn new(state: ConnectionState) -> Self {
        Self(Arc::new(StateCell {
            value: AtomicU8::new(state as u8),
            changed: Notify::new(),
        }))
    }

    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.value.load(Ordering::Acquire))
    }

    pub fn is_open(&self) -> bool {
        self.get() == ConnectionState::Open
    }

    /// Connecting -> Open. Returns false if the connection already left Connecting.
    pub fn mark_open(&self) -> bool {
        self.transition(ConnectionState::Connecting, ConnectionState::Open)
    }

    /// Open -> Closing. Returns false if the connection was not open.
    pub fn begin_closing(&self) -> bool {
        self.transition(ConnectionState::Open, ConnectionState::Closing)
    }

    pub fn mark_closed(&self) {
        self.0
            .value
            .store(ConnectionState::Closed as u8, Ordering::Release);
        self.0.changed.notify_waiters();
    }

    /// Resolves once the state is `Closing` or `Closed`. Cancel safe.
    pub async fn closing(&self) {
        loop {
            let notified = self.0.changed.notified();
            tokio::pin!(notified);
            // Register before checking so a transition in between is not missed
            notified.as_mut().enable();

            if matches!(
                self.get(),
                ConnectionState::Closing | ConnectionState::Closed
            ) {
                return;
            }
            notified.await;
        }
    }

    fn transition(&self, from: ConnectionState, to: ConnectionState) -> bool {
        let changed = self
            .0
            .value
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if changed {
            self.0.changed.notify_waiters();
        }
        changed
    }
}

impl Default for SharedConnectionState {
    fn default() -> Self {
        Self::new(ConnectionState::Connecting)
    }
}
