use vantage_core::{Datatype, Function, Query, Symbol};

use crate::cli::SeriesArgs;
use crate::error::CliError;

pub fn plan(args: &SeriesArgs, datatype: Datatype) -> Result<Vec<Query>, CliError> {
    let function = Function::from(args.function);
    args.symbols
        .iter()
        .map(|raw| {
            let symbol = Symbol::parse(raw)?;
            Ok(Query::new(function, symbol)?.with_datatype(datatype)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SeriesFunction;

    #[test]
    fn json_is_refused_for_plain_series() {
        let args = SeriesArgs {
            symbols: vec![String::from("IBM")],
            function: SeriesFunction::Monthly,
        };

        assert!(plan(&args, Datatype::Csv).is_ok());
        assert!(matches!(
            plan(&args, Datatype::Json),
            Err(CliError::Validation(_))
        ));
    }
}
