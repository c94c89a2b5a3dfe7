//! Severity tiers of a resolved topic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity bucket computed by a topic's resolver.
///
/// Ordered by severity so tiers can be compared with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    SelfCare,
    Escalate,
    Emergency,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::SelfCare => "self_care",
            Tier::Escalate => "escalate",
            Tier::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
