use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FeedError;

/// Time granularity of a series.
///
/// Parsing accepts the exact variant name only (`"Daily"`, not `"daily"`),
/// matching the values subscription headers carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Individual ticks.
    Tick,
    /// One-second bars.
    Second,
    /// One-minute bars.
    Minute,
    /// One-hour bars.
    Hour,
    /// One bar per trading day.
    Daily,
}

impl Resolution {
    /// Variant name as it appears in headers and collection names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tick => "Tick",
            Self::Second => "Second",
            Self::Minute => "Minute",
            Self::Hour => "Hour",
            Self::Daily => "Daily",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tick" => Ok(Self::Tick),
            "Second" => Ok(Self::Second),
            "Minute" => Ok(Self::Minute),
            "Hour" => Ok(Self::Hour),
            "Daily" => Ok(Self::Daily),
            other => Err(FeedError::invalid_header("resolution", other)),
        }
    }
}
