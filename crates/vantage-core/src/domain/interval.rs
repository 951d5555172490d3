use std::fmt::{Display, Formatter};

use crate::ValidationError;

/// Spacing between intraday data points accepted by `TIME_SERIES_INTRADAY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntradayInterval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
}

impl IntradayInterval {
    pub const ALL: [Self; 5] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::SixtyMinutes,
    ];

    pub const fn minutes(self) -> u32 {
        match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::SixtyMinutes => 60,
        }
    }

    /// Value of the `interval` query parameter, e.g. `5min`.
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::OneMinute => "1min",
            Self::FiveMinutes => "5min",
            Self::FifteenMinutes => "15min",
            Self::ThirtyMinutes => "30min",
            Self::SixtyMinutes => "60min",
        }
    }

    /// Key of the JSON section holding the points, e.g. `Time Series (5min)`.
    pub fn series_key(self) -> String {
        format!("Time Series ({})", self.as_query_value())
    }
}

impl Display for IntradayInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl TryFrom<u32> for IntradayInterval {
    type Error = ValidationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.minutes() == minutes)
            .ok_or_else(|| ValidationError::InvalidInterval {
                value: minutes.to_string(),
            })
    }
}
