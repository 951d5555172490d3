use serde_json::{Map, Value};

use super::extract::{as_object, required_object_field, text_field};
use crate::{SchemaMismatch, Table};

const SECTION: &str = "Global Quote";

/// Column name and response key of each quote field, in output order.
const QUOTE_FIELDS: [(&str, &str); 10] = [
    ("Symbol", "01. symbol"),
    ("Open", "02. open"),
    ("High", "03. high"),
    ("Low", "04. low"),
    ("Price", "05. price"),
    ("Volume", "06. volume"),
    ("Latest trading day", "07. latest trading day"),
    ("Previous close", "08. previous close"),
    ("Change", "09. change"),
    ("Change percent", "10. change percent"),
];

/// One `GLOBAL_QUOTE` record with every value kept as the API's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    pub symbol: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub price: String,
    pub volume: String,
    pub latest_trading_day: String,
    pub previous_close: String,
    pub change: String,
    pub change_percent: String,
}

impl QuoteRecord {
    /// Read the record out of a parsed `GLOBAL_QUOTE` response.
    ///
    /// The `Global Quote` section must exist: a quote request always returns
    /// exactly one record, so an absent section is a schema error rather than
    /// an empty result.
    pub fn from_response(response: &Value) -> Result<Self, SchemaMismatch> {
        let root = as_object(response, "response", "<root>")?;
        let quote = required_object_field(root, "response", SECTION)?;
        Self::from_section(quote)
    }

    fn from_section(quote: &Map<String, Value>) -> Result<Self, SchemaMismatch> {
        let field = |key: &str| text_field(quote, SECTION, key).map(str::to_owned);

        Ok(Self {
            symbol: field("01. symbol")?,
            open: field("02. open")?,
            high: field("03. high")?,
            low: field("04. low")?,
            price: field("05. price")?,
            volume: field("06. volume")?,
            latest_trading_day: field("07. latest trading day")?,
            previous_close: field("08. previous close")?,
            change: field("09. change")?,
            change_percent: field("10. change percent")?,
        })
    }

    pub fn header() -> Vec<String> {
        QUOTE_FIELDS
            .iter()
            .map(|(column, _)| (*column).to_owned())
            .collect()
    }

    pub fn into_row(self) -> Vec<String> {
        vec![
            self.symbol,
            self.open,
            self.high,
            self.low,
            self.price,
            self.volume,
            self.latest_trading_day,
            self.previous_close,
            self.change,
            self.change_percent,
        ]
    }

    pub fn into_table(self) -> Table {
        Table::from_uniform_rows(Self::header(), vec![self.into_row()])
    }
}

/// Decode a `GLOBAL_QUOTE` JSON response into a two-row table.
pub fn decode_quote(response: &Value) -> Result<Table, SchemaMismatch> {
    QuoteRecord::from_response(response).map(QuoteRecord::into_table)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Mismatch;

    fn quote_response() -> Value {
        json!({
            "Global Quote": {
                "01. symbol": "MSFT",
                "02. open": "300.0",
                "03. high": "305.5",
                "04. low": "299.1",
                "05. price": "304.2",
                "06. volume": "21000000",
                "07. latest trading day": "2024-01-02",
                "08. previous close": "302.7",
                "09. change": "1.5",
                "10. change percent": "0.5%"
            }
        })
    }

    #[test]
    fn data_row_follows_numbered_key_order() {
        let table = decode_quote(&quote_response()).expect("valid quote");

        assert_eq!(table.record_count(), 2);
        assert_eq!(table.column_count(), 10);
        assert_eq!(
            table.rows()[0],
            [
                "MSFT",
                "300.0",
                "305.5",
                "299.1",
                "304.2",
                "21000000",
                "2024-01-02",
                "302.7",
                "1.5",
                "0.5%"
            ]
        );
    }

    #[test]
    fn header_matches_column_names() {
        assert_eq!(
            QuoteRecord::header(),
            [
                "Symbol",
                "Open",
                "High",
                "Low",
                "Price",
                "Volume",
                "Latest trading day",
                "Previous close",
                "Change",
                "Change percent"
            ]
        );
    }

    #[test]
    fn header_keys_line_up_with_record_fields() {
        let response = quote_response();
        let section = response["Global Quote"].as_object().expect("fixture object");
        let row = QuoteRecord::from_response(&response)
            .expect("valid quote")
            .into_row();

        for ((_, key), value) in QUOTE_FIELDS.iter().zip(&row) {
            assert_eq!(section[*key].as_str(), Some(value.as_str()));
        }
    }

    #[test]
    fn missing_section_is_an_error() {
        let err = decode_quote(&json!({ "Note": "API call frequency exceeded" }))
            .expect_err("must fail");

        assert_eq!(err.field(), "Global Quote");
        assert_eq!(err.mismatch(), Mismatch::Missing);
    }

    #[test]
    fn single_bad_field_names_the_field() {
        let mut response = quote_response();
        response["Global Quote"]["09. change"] = json!(1.5);

        let err = decode_quote(&response).expect_err("must fail");

        assert_eq!(err.field(), "09. change");
        assert_eq!(err.section(), "Global Quote");
    }
}
