//! # Vantage Core
//!
//! Fetches Alpha Vantage stock reports and normalizes every response into
//! one canonical [`Table`]: a header row followed by data rows, all of the
//! same width, with every value kept as the text the API sent.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`decode`] | CSV pass-through reader and the intraday / quote JSON decoders |
//! | [`table`] | The header + rows output contract |
//! | [`domain`] | Validated symbols, functions, datatypes, intervals |
//! | [`query`] | Query-URL construction |
//! | [`http_client`] | Transport trait and reqwest implementation |
//! | [`client`] | Fetch client: query, transport, status check, decode |
//! | [`writer`] | CSV file writer |
//! | [`config`] | Client configuration and environment overrides |
//! | [`error`] | Error taxonomy |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vantage_core::{AlphaVantageClient, ClientConfig, Datatype};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlphaVantageClient::new(ClientConfig::from_env())?;
//!     let table = client.time_series_intraday("IBM", 5, Datatype::Json).await?;
//!     vantage_core::write_table(&table, "TIME_SERIES_INTRADAY.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding without the network
//!
//! ```rust
//! use vantage_core::{Datatype, Decoder, IntradayInterval, RawResponse, ResponseShape};
//!
//! let body = br#"{"Time Series (5min)": {"2024-01-02 09:30:00": {
//!     "1. open": "10.0", "2. high": "10.5", "3. low": "9.9",
//!     "4. close": "10.2", "5. volume": "1000"}}}"#;
//! let raw = RawResponse::new(
//!     body,
//!     Datatype::Json,
//!     ResponseShape::Intraday(IntradayInterval::FiveMinutes),
//! );
//!
//! let table = Decoder::default().decode(raw).unwrap();
//! assert_eq!(table.header(), ["Time", "Open", "High", "Low", "Volume"]);
//! assert_eq!(table.rows()[0], ["2024-01-02 09:30:00", "10.0", "10.5", "9.9", "1000"]);
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use vantage_core::{ErrorKind, VantageError};
//!
//! fn describe(error: &VantageError) -> &'static str {
//!     match error.kind() {
//!         ErrorKind::InvalidArgument => "fix the request; nothing was sent",
//!         ErrorKind::Transport => "network failure or timeout",
//!         ErrorKind::Rejected => "the API refused the request",
//!         ErrorKind::Decode | ErrorKind::SchemaMismatch => "unexpected response body",
//!         ErrorKind::Write => "could not persist the table",
//!     }
//! }
//! ```
//!
//! API keys are never logged: requests are traced with a redacted URL.

pub mod client;
pub mod config;
pub mod decode;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod query;
pub mod table;
pub mod writer;

pub use client::AlphaVantageClient;
pub use config::ClientConfig;
pub use decode::{
    decode_quote, read_csv_table, Decoder, IntradayDecoder, IntradayField, QuoteRecord,
    RawResponse, ResponseShape,
};
pub use domain::{Datatype, Function, IntradayInterval, Symbol};
pub use error::{
    DecodeError, ErrorKind, Mismatch, SchemaMismatch, ValidationError, VantageError, WriteError,
};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use query::Query;
pub use table::Table;
pub use writer::{to_csv_string, write_table, write_table_to};
