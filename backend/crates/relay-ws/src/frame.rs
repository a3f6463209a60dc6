use axum::extract::ws::{Message, Utf8Bytes};
use bytes::Bytes;

/// One producer message, forwarded verbatim.
///
/// The payload is never inspected. The WebSocket opcode it arrived with is kept
/// so subscribers get the same message type back. Clones share the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Binary(Bytes),
    Text(Utf8Bytes),
}

impl Frame {
    /// Data-carrying messages become frames; control messages do not.
    pub fn from_message(message: Message) -> Option<Self> {
        match message {
            Message::Binary(data) => Some(Self::Binary(data)),
            Message::Text(text) => Some(Self::Text(text)),
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Binary(data) => data,
            Self::Text(text) => text.as_str().as_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame kind for metrics/logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Binary(_) => "binary",
            Self::Text(_) => "text",
        }
    }
}

impl From<Frame> for Message {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Binary(data) => Message::Binary(data),
            Frame::Text(text) => Message::Text(text),
        }
    }
}
