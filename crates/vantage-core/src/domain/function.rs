use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Report requested from the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Function {
    TimeSeriesIntraday,
    TimeSeriesDaily,
    TimeSeriesDailyAdjusted,
    TimeSeriesWeekly,
    TimeSeriesWeeklyAdjusted,
    TimeSeriesMonthly,
    TimeSeriesMonthlyAdjusted,
    GlobalQuote,
}

impl Function {
    pub const ALL: [Self; 8] = [
        Self::TimeSeriesIntraday,
        Self::TimeSeriesDaily,
        Self::TimeSeriesDailyAdjusted,
        Self::TimeSeriesWeekly,
        Self::TimeSeriesWeeklyAdjusted,
        Self::TimeSeriesMonthly,
        Self::TimeSeriesMonthlyAdjusted,
        Self::GlobalQuote,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeSeriesIntraday => "TIME_SERIES_INTRADAY",
            Self::TimeSeriesDaily => "TIME_SERIES_DAILY",
            Self::TimeSeriesDailyAdjusted => "TIME_SERIES_DAILY_ADJUSTED",
            Self::TimeSeriesWeekly => "TIME_SERIES_WEEKLY",
            Self::TimeSeriesWeeklyAdjusted => "TIME_SERIES_WEEKLY_ADJUSTED",
            Self::TimeSeriesMonthly => "TIME_SERIES_MONTHLY",
            Self::TimeSeriesMonthlyAdjusted => "TIME_SERIES_MONTHLY_ADJUSTED",
            Self::GlobalQuote => "GLOBAL_QUOTE",
        }
    }

    pub const fn requires_interval(self) -> bool {
        matches!(self, Self::TimeSeriesIntraday)
    }

    /// Whether a JSON decoder exists for this function's response.
    pub const fn supports_json(self) -> bool {
        matches!(self, Self::TimeSeriesIntraday | Self::GlobalQuote)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response encoding requested through the `datatype` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Datatype {
    #[default]
    Csv,
    Json,
}

impl Datatype {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl Display for Datatype {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_intraday_and_quote_have_json_decoders() {
        let json_capable = Function::ALL
            .into_iter()
            .filter(|function| function.supports_json())
            .collect::<Vec<_>>();
        assert_eq!(
            json_capable,
            vec![Function::TimeSeriesIntraday, Function::GlobalQuote]
        );
    }

    #[test]
    fn datatype_defaults_to_csv() {
        assert_eq!(Datatype::default(), Datatype::Csv);
        assert_eq!(Datatype::Json.as_str(), "json");
    }
}
