use serde::{Deserialize, Serialize};

/// Unit of a reminder lead time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "m")]
    Minutes,
    #[serde(rename = "h")]
    Hours,
    #[serde(rename = "d")]
    Days,
    /// Fire together with schedule creation
    #[serde(rename = "now")]
    Immediate,
}

impl TimeUnit {
    /// Scale of the Immediate unit, distinct from every positive multiplier
    pub const IMMEDIATE_SCALE: i64 = -1;

    pub fn all() -> &'static [TimeUnit] {
        &[
            TimeUnit::Seconds,
            TimeUnit::Minutes,
            TimeUnit::Hours,
            TimeUnit::Days,
            TimeUnit::Immediate,
        ]
    }

    /// Seconds per unit
    pub fn scale(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 60 * 60,
            TimeUnit::Days => 24 * 60 * 60,
            TimeUnit::Immediate => Self::IMMEDIATE_SCALE,
        }
    }

    pub fn is_immediate(self) -> bool {
        self == TimeUnit::Immediate
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "second(s)",
            TimeUnit::Minutes => "minute(s)",
            TimeUnit::Hours => "hour(s)",
            TimeUnit::Days => "day(s)",
            TimeUnit::Immediate => "immediately",
        }
    }

    /// Next unit in selector order, wrapping around
    pub fn next(self) -> TimeUnit {
        let units = Self::all();
        let index = units.iter().position(|u| *u == self).unwrap_or(0);
        units[(index + 1) % units.len()]
    }

    pub fn previous(self) -> TimeUnit {
        let units = Self::all();
        let index = units.iter().position(|u| *u == self).unwrap_or(0);
        units[(index + units.len() - 1) % units.len()]
    }
}
