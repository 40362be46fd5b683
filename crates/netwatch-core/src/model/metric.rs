// ── Metric identifiers ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// One monitored network-health dimension.
///
/// The lowercase key (`Display` / `FromStr`) is what configuration files
/// and log lines use; [`title`](Self::title) is what panels show.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    Bandwidth,
    Latency,
    Stability,
    Routing,
    Protocol,
}

impl Metric {
    /// Every metric, in declaration order.
    pub const ALL: [Metric; 5] = [
        Self::Bandwidth,
        Self::Latency,
        Self::Stability,
        Self::Routing,
        Self::Protocol,
    ];

    /// Human-readable panel title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Bandwidth => "Bandwidth",
            Self::Latency => "Latency",
            Self::Stability => "Stability",
            Self::Routing => "Routing",
            Self::Protocol => "Protocol",
        }
    }

    /// Lowercase key used in config and logs.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_through_from_str() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn display_uses_lowercase_key() {
        assert_eq!(Metric::Bandwidth.to_string(), "bandwidth");
        assert_eq!(Metric::Routing.title(), "Routing");
    }
}
