use vantage_core::{Datatype, Function, Query, Symbol};

use crate::cli::QuoteArgs;
use crate::error::CliError;

pub fn plan(args: &QuoteArgs, datatype: Datatype) -> Result<Vec<Query>, CliError> {
    args.symbols
        .iter()
        .map(|raw| {
            let symbol = Symbol::parse(raw)?;
            Ok(Query::new(Function::GlobalQuote, symbol)?.with_datatype(datatype)?)
        })
        .collect()
}
