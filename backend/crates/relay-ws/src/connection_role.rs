/// Which listener accepted a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRole {
    Producer,
    Subscriber,
}

impl ConnectionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Producer => "producer",
            Self::Subscriber => "subscriber",
        }
    }
}

impl std::fmt::Display for ConnectionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
