//! Query-URL construction for the remote API.

use crate::decode::ResponseShape;
use crate::{Datatype, Function, IntradayInterval, Symbol, ValidationError};

/// A validated request for one report about one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    function: Function,
    symbol: Symbol,
    interval: Option<IntradayInterval>,
    datatype: Datatype,
}

impl Query {
    /// A non-intraday report. Intraday needs [`Query::intraday`] instead.
    pub fn new(function: Function, symbol: Symbol) -> Result<Self, ValidationError> {
        if function.requires_interval() {
            return Err(ValidationError::MissingInterval {
                function: function.as_str(),
            });
        }
        Ok(Self {
            function,
            symbol,
            interval: None,
            datatype: Datatype::default(),
        })
    }

    pub fn intraday(symbol: Symbol, interval: IntradayInterval) -> Self {
        Self {
            function: Function::TimeSeriesIntraday,
            symbol,
            interval: Some(interval),
            datatype: Datatype::default(),
        }
    }

    /// Switch the requested encoding, rejecting JSON where no decoder exists.
    pub fn with_datatype(mut self, datatype: Datatype) -> Result<Self, ValidationError> {
        if datatype == Datatype::Json && !self.function.supports_json() {
            return Err(ValidationError::JsonUnsupported {
                function: self.function.as_str(),
            });
        }
        self.datatype = datatype;
        Ok(self)
    }

    pub const fn function(&self) -> Function {
        self.function
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub const fn interval(&self) -> Option<IntradayInterval> {
        self.interval
    }

    pub const fn datatype(&self) -> Datatype {
        self.datatype
    }

    pub fn shape(&self) -> ResponseShape {
        match (self.function, self.interval) {
            (Function::TimeSeriesIntraday, Some(interval)) => ResponseShape::Intraday(interval),
            (Function::GlobalQuote, _) => ResponseShape::Quote,
            (function, _) => ResponseShape::Series(function),
        }
    }

    /// Full request URL including the api key.
    pub fn url(&self, base_url: &str, api_key: &str) -> String {
        format!(
            "{}&apikey={}",
            self.url_without_key(base_url),
            urlencoding::encode(api_key)
        )
    }

    /// Request URL with the api key replaced, safe to log.
    pub fn redacted_url(&self, base_url: &str) -> String {
        format!("{}&apikey=<redacted>", self.url_without_key(base_url))
    }

    fn url_without_key(&self, base_url: &str) -> String {
        let separator = if base_url.ends_with(['?', '&']) {
            ""
        } else if base_url.contains('?') {
            "&"
        } else {
            "?"
        };
        let mut url = format!(
            "{base_url}{separator}function={}&symbol={}",
            self.function.as_str(),
            urlencoding::encode(self.symbol.as_str())
        );
        if let Some(interval) = self.interval {
            url.push_str("&interval=");
            url.push_str(interval.as_query_value());
        }
        url.push_str("&datatype=");
        url.push_str(self.datatype.as_str());
        url
    }

    /// Default output file name, `<FUNCTION>.csv`.
    pub fn default_file_name(&self) -> String {
        format!("{}.csv", self.function.as_str())
    }

    /// Per-symbol output file name, `<FUNCTION>_<SYMBOL>.csv`, for runs that
    /// fetch several symbols.
    pub fn symbol_file_name(&self) -> String {
        format!("{}_{}.csv", self.function.as_str(), self.symbol.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.alphavantage.co/query";

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("valid symbol")
    }

    #[test]
    fn intraday_url_carries_interval_and_datatype() {
        let query = Query::intraday(symbol("IBM"), IntradayInterval::FiveMinutes);

        assert_eq!(
            query.url(BASE, "demo"),
            "https://www.alphavantage.co/query?function=TIME_SERIES_INTRADAY&symbol=IBM\
             &interval=5min&datatype=csv&apikey=demo"
        );
    }

    #[test]
    fn redacted_url_hides_key() {
        let query = Query::new(Function::GlobalQuote, symbol("MSFT"))
            .and_then(|query| query.with_datatype(Datatype::Json))
            .expect("valid query");

        let url = query.redacted_url(BASE);

        assert!(url.ends_with("&datatype=json&apikey=<redacted>"));
        assert!(query.url(BASE, "secret").ends_with("&datatype=json&apikey=secret"));
    }

    #[test]
    fn api_key_is_percent_encoded() {
        let query = Query::new(Function::TimeSeriesDaily, symbol("IBM")).expect("valid query");
        assert!(query.url(BASE, "a b&c").ends_with("&apikey=a%20b%26c"));
    }

    #[test]
    fn existing_query_string_is_extended() {
        let query = Query::new(Function::TimeSeriesMonthly, symbol("IBM")).expect("valid query");
        assert!(query
            .url("http://localhost:8080/query?entitlement=delayed", "k")
            .starts_with("http://localhost:8080/query?entitlement=delayed&function=TIME_SERIES_MONTHLY"));
    }

    #[test]
    fn trailing_separator_on_base_is_not_doubled() {
        let query = Query::new(Function::TimeSeriesWeekly, symbol("IBM")).expect("valid query");

        assert_eq!(
            query.url("https://www.alphavantage.co/query?", "k"),
            "https://www.alphavantage.co/query?function=TIME_SERIES_WEEKLY&symbol=IBM&datatype=csv&apikey=k"
        );
        assert!(query
            .redacted_url("http://localhost:8080/query?entitlement=delayed&")
            .starts_with("http://localhost:8080/query?entitlement=delayed&function=TIME_SERIES_WEEKLY&"));
    }

    #[test]
    fn intraday_requires_interval_constructor() {
        let err = Query::new(Function::TimeSeriesIntraday, symbol("IBM")).expect_err("must fail");
        assert!(matches!(err, ValidationError::MissingInterval { .. }));
    }

    #[test]
    fn json_is_rejected_for_plain_series() {
        let err = Query::new(Function::TimeSeriesWeeklyAdjusted, symbol("IBM"))
            .and_then(|query| query.with_datatype(Datatype::Json))
            .expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::JsonUnsupported {
                function: "TIME_SERIES_WEEKLY_ADJUSTED"
            }
        );
    }

    #[test]
    fn shape_follows_function() {
        let quote = Query::new(Function::GlobalQuote, symbol("IBM")).expect("valid query");
        assert_eq!(quote.shape(), ResponseShape::Quote);

        let daily = Query::new(Function::TimeSeriesDaily, symbol("IBM")).expect("valid query");
        assert_eq!(daily.shape(), ResponseShape::Series(Function::TimeSeriesDaily));
        assert_eq!(daily.default_file_name(), "TIME_SERIES_DAILY.csv");
        assert_eq!(daily.symbol_file_name(), "TIME_SERIES_DAILY_IBM.csv");
    }
}
