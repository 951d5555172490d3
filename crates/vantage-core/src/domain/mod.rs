//! # Domain Types
//!
//! Validated request parameters for the remote API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`Function`] | Requested report (`TIME_SERIES_INTRADAY`, `GLOBAL_QUOTE`, ...) |
//! | [`Datatype`] | Requested encoding (CSV or JSON) |
//! | [`IntradayInterval`] | Intraday spacing (1, 5, 15, 30, 60 minutes) |
//!
//! Construction validates every invariant, so a value of any of these types
//! can be put on the wire without further checks.

mod function;
mod interval;
mod symbol;

pub use function::{Datatype, Function};
pub use interval::IntradayInterval;
pub use symbol::Symbol;
