use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How concurrent producer connections are arbitrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProducerPolicy {
    /// Every producer broadcasts independently
    #[default]
    Shared,
    /// A new producer closes all previously connected ones
    Supersede,
}

impl FromStr for ProducerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "supersede" => Ok(Self::Supersede),
            other => Err(format!("unknown producer policy: {other}")),
        }
    }
}

impl fmt::Display for ProducerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::Supersede => write!(f, "supersede"),
        }
    }
}
