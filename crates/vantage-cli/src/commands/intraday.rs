use vantage_core::{Datatype, IntradayInterval, Query, Symbol};

use crate::cli::IntradayArgs;
use crate::error::CliError;

/// One intraday query per symbol. The interval is validated once, up front.
pub fn plan(args: &IntradayArgs, datatype: Datatype) -> Result<Vec<Query>, CliError> {
    let interval = IntradayInterval::try_from(args.interval)?;
    args.symbols
        .iter()
        .map(|raw| {
            let symbol = Symbol::parse(raw)?;
            Ok(Query::intraday(symbol, interval).with_datatype(datatype)?)
        })
        .collect()
}
