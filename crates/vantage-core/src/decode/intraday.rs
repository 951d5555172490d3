use std::fmt::{Display, Formatter};

use serde_json::{Map, Value};
use tracing::debug;

use super::extract::{as_object, text_field, Members};
use crate::{DecodeError, IntradayInterval, SchemaMismatch, Table, ValidationError, VantageError};

const TIME_COLUMN: &str = "Time";

/// A numbered field of one intraday data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntradayField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl IntradayField {
    /// Columns emitted by default: close is left out.
    pub const LEGACY: [Self; 4] = [Self::Open, Self::High, Self::Low, Self::Volume];

    pub const OHLCV: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// Key of the field inside a point object.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Open => "1. open",
            Self::High => "2. high",
            Self::Low => "3. low",
            Self::Close => "4. close",
            Self::Volume => "5. volume",
        }
    }

    pub const fn column(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }
}

impl Display for IntradayField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Timestamped values of one point, in column-set order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TimeSeriesPoint {
    timestamp: String,
    values: Vec<String>,
}

impl TimeSeriesPoint {
    fn extract(
        timestamp: &str,
        point: &Map<String, Value>,
        section: &str,
        fields: &[IntradayField],
    ) -> Result<Self, SchemaMismatch> {
        let label = format!("{section} / {timestamp}");
        let values = fields
            .iter()
            .map(|field| text_field(point, &label, field.key()).map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            timestamp: timestamp.to_owned(),
            values,
        })
    }

    fn into_row(self) -> Vec<String> {
        let mut row = Vec::with_capacity(self.values.len() + 1);
        row.push(self.timestamp);
        row.extend(self.values);
        row
    }
}

/// Decodes `TIME_SERIES_INTRADAY` JSON responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntradayDecoder {
    interval: IntradayInterval,
    fields: Vec<IntradayField>,
}

impl IntradayDecoder {
    pub fn new(interval: IntradayInterval) -> Self {
        Self {
            interval,
            fields: IntradayField::LEGACY.to_vec(),
        }
    }

    /// Choose which numbered fields become columns, in order.
    pub fn with_fields(
        interval: IntradayInterval,
        fields: impl Into<Vec<IntradayField>>,
    ) -> Result<Self, ValidationError> {
        let fields = fields.into();
        if fields.is_empty() {
            return Err(ValidationError::EmptyColumnSet);
        }
        Ok(Self { interval, fields })
    }

    pub fn header(&self) -> Vec<String> {
        std::iter::once(TIME_COLUMN)
            .chain(self.fields.iter().map(|field| field.column()))
            .map(str::to_owned)
            .collect()
    }

    /// Decode a JSON body into a table ordered ascending by timestamp.
    ///
    /// A response without the interval's series section yields a header-only
    /// table. Repeated timestamps stay as separate rows. Any point with a
    /// missing or non-text field fails the whole decode.
    pub fn decode(&self, body: &[u8]) -> Result<Table, VantageError> {
        let root: Members<Members<Value>> =
            serde_json::from_slice(body).map_err(DecodeError::from)?;
        Ok(self.assemble(root)?)
    }

    fn assemble(&self, root: Members<Members<Value>>) -> Result<Table, SchemaMismatch> {
        let section = self.interval.series_key();
        let series = root
            .into_object("response", "<root>")?
            .into_iter()
            .rev()
            .find_map(|(key, value)| (key == section).then_some(value));

        let Some(series) = series else {
            debug!(section = %section, "series section absent, emitting header only");
            return Ok(Table::header_only(self.header()));
        };

        let mut points = series
            .into_object("response", &section)?
            .iter()
            .map(|(timestamp, point)| {
                let point = as_object(point, &section, timestamp)?;
                TimeSeriesPoint::extract(timestamp, point, &section, &self.fields)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Timestamps are fixed-width and zero padded, so byte order is time order.
        points.sort_by(|left, right| {
            left.timestamp
                .cmp(&right.timestamp)
                .then_with(|| left.values.cmp(&right.values))
        });

        debug!(points = points.len(), interval = %self.interval, "decoded intraday series");

        let rows = points.into_iter().map(TimeSeriesPoint::into_row).collect();
        Ok(Table::from_uniform_rows(self.header(), rows))
    }
}
