//! # Response Normalization
//!
//! Decoders turning a raw response body into a [`Table`].
//!
//! | Datatype | Shape | Decoder |
//! |----------|-------|---------|
//! | CSV | any | [`read_csv_table`] (pass-through) |
//! | JSON | intraday | [`IntradayDecoder`] |
//! | JSON | quote | [`decode_quote`] |
//! | JSON | series | rejected with [`ValidationError::JsonUnsupported`] |
//!
//! Every decoder is a pure function of its input: it reads the body, never
//! retains it, and either returns a complete table or an error. Partial
//! tables are never produced.

mod csv_reader;
mod extract;
mod intraday;
mod quote;

use serde_json::Value;

pub use csv_reader::read_csv_table;
pub use extract::text_field;
pub use intraday::{IntradayDecoder, IntradayField};
pub use quote::{decode_quote, QuoteRecord};

use crate::{Datatype, DecodeError, Function, IntradayInterval, Table, ValidationError, VantageError};

/// Which decoder a response body needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Intraday(IntradayInterval),
    Quote,
    /// Daily, weekly, and monthly series; only decodable as CSV.
    Series(Function),
}

impl ResponseShape {
    pub const fn function(self) -> Function {
        match self {
            Self::Intraday(_) => Function::TimeSeriesIntraday,
            Self::Quote => Function::GlobalQuote,
            Self::Series(function) => function,
        }
    }
}

/// Response body borrowed from the transport together with what it claims to be.
#[derive(Debug, Clone, Copy)]
pub struct RawResponse<'a> {
    pub body: &'a [u8],
    pub datatype: Datatype,
    pub shape: ResponseShape,
}

impl<'a> RawResponse<'a> {
    pub const fn new(body: &'a [u8], datatype: Datatype, shape: ResponseShape) -> Self {
        Self {
            body,
            datatype,
            shape,
        }
    }
}

/// Selects and runs the decoder for a [`RawResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    intraday_fields: Vec<IntradayField>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            intraday_fields: IntradayField::LEGACY.to_vec(),
        }
    }
}

impl Decoder {
    /// Use a custom column set for intraday JSON responses.
    pub fn with_intraday_fields(
        fields: impl Into<Vec<IntradayField>>,
    ) -> Result<Self, ValidationError> {
        let intraday_fields = fields.into();
        if intraday_fields.is_empty() {
            return Err(ValidationError::EmptyColumnSet);
        }
        Ok(Self { intraday_fields })
    }

    pub fn intraday_fields(&self) -> &[IntradayField] {
        &self.intraday_fields
    }

    pub fn decode(&self, raw: RawResponse<'_>) -> Result<Table, VantageError> {
        match (raw.datatype, raw.shape) {
            (Datatype::Csv, _) => Ok(read_csv_table(raw.body)?),
            (Datatype::Json, ResponseShape::Intraday(interval)) => {
                IntradayDecoder::with_fields(interval, self.intraday_fields.clone())?
                    .decode(raw.body)
            }
            (Datatype::Json, ResponseShape::Quote) => Ok(decode_quote(&parse_json(raw.body)?)?),
            (Datatype::Json, ResponseShape::Series(function)) => {
                Err(ValidationError::JsonUnsupported {
                    function: function.as_str(),
                }
                .into())
            }
        }
    }
}

fn parse_json(body: &[u8]) -> Result<Value, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn csv_bodies_bypass_json_decoders() {
        let body = b"symbol,open\nIBM,180.1\n";
        let raw = RawResponse::new(body, Datatype::Csv, ResponseShape::Quote);

        let table = Decoder::default().decode(raw).expect("valid csv");

        assert_eq!(table.header(), ["symbol", "open"]);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let raw = RawResponse::new(b"{\"Global Quote\": ", Datatype::Json, ResponseShape::Quote);

        let err = Decoder::default().decode(raw).expect_err("must fail");

        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn json_series_is_rejected_up_front() {
        let raw = RawResponse::new(
            b"{}",
            Datatype::Json,
            ResponseShape::Series(Function::TimeSeriesWeekly),
        );

        let err = Decoder::default().decode(raw).expect_err("must fail");

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn custom_intraday_fields_flow_into_header() {
        let decoder = Decoder::with_intraday_fields(IntradayField::OHLCV).expect("valid");
        let raw = RawResponse::new(
            b"{}",
            Datatype::Json,
            ResponseShape::Intraday(IntradayInterval::OneMinute),
        );

        let table = decoder.decode(raw).expect("header-only table");

        assert_eq!(table.header().len(), 6);
        assert_eq!(table.row_count(), 0);
    }
}
