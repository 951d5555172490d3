mod intraday;
mod quote;
mod series;

use std::path::PathBuf;

use tracing::debug;
use vantage_core::{
    write_table, write_table_to, AlphaVantageClient, ClientConfig, Datatype, Decoder,
    IntradayField, Query, Table, VantageError, WriteError,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::{self, TableSummary};

/// Where one fetched table goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Stdout,
    File(PathBuf),
}

impl Target {
    fn label(&self) -> String {
        match self {
            Self::Stdout => String::from("-"),
            Self::File(path) => path.display().to_string(),
        }
    }
}

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let client = AlphaVantageClient::new(client_config(cli))?.with_decoder(decoder(cli)?);
    execute(cli, &client).await
}

async fn execute(cli: &Cli, client: &AlphaVantageClient) -> Result<(), CliError> {
    let queries = plan(cli)?;
    let targets = targets(cli, &queries)?;
    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let total = queries.len();
    let mut failures = Vec::new();
    for (query, target) in queries.iter().zip(targets) {
        match fetch_one(client, query, &target).await {
            Ok(summary) => output::emit_summary(&summary, cli.stdout)?,
            Err(failure) => {
                debug!(symbol = %query.symbol(), code = failure.exit_code(), "fetch failed");
                failures.push(failure);
            }
        }
    }

    if total == 1 {
        if let Some(failure) = failures.pop() {
            return Err(failure);
        }
        return Ok(());
    }

    match failures.first() {
        None => Ok(()),
        Some(first) => {
            for failure in &failures {
                eprintln!("error: {failure}");
            }
            Err(CliError::Incomplete {
                failed: failures.len(),
                total,
                code: first.exit_code(),
            })
        }
    }
}

fn plan(cli: &Cli) -> Result<Vec<Query>, CliError> {
    let datatype = Datatype::from(cli.datatype);
    match &cli.command {
        Command::Intraday(args) => intraday::plan(args, datatype),
        Command::Series(args) => series::plan(args, datatype),
        Command::Quote(args) => quote::plan(args, datatype),
    }
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(api_key) = &cli.apikey {
        config = config.with_api_key(api_key.as_str());
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    debug!(?config, "resolved client config");
    config
}

fn decoder(cli: &Cli) -> Result<Decoder, CliError> {
    if cli.with_close {
        Ok(Decoder::with_intraday_fields(IntradayField::OHLCV.to_vec())?)
    } else {
        Ok(Decoder::default())
    }
}

fn targets(cli: &Cli, queries: &[Query]) -> Result<Vec<Target>, CliError> {
    if cli.stdout {
        return Ok(vec![Target::Stdout; queries.len()]);
    }

    if let Some(path) = &cli.output {
        if queries.len() > 1 {
            return Err(CliError::Command(String::from(
                "--output names a single file; use --output-dir when fetching several symbols",
            )));
        }
        return Ok(vec![Target::File(path.clone())]);
    }

    let dir = cli.output_dir.clone().unwrap_or_default();
    let per_symbol = queries.len() > 1;
    Ok(queries
        .iter()
        .map(|query| {
            let name = if per_symbol {
                query.symbol_file_name()
            } else {
                query.default_file_name()
            };
            Target::File(dir.join(name))
        })
        .collect())
}

async fn fetch_one(
    client: &AlphaVantageClient,
    query: &Query,
    target: &Target,
) -> Result<TableSummary, CliError> {
    let failed = |source: VantageError| CliError::Fetch {
        symbol: query.symbol().to_string(),
        source,
    };

    let table = client.fetch(query).await.map_err(failed)?;
    match target {
        Target::Stdout => write_stdout(&table).map_err(failed)?,
        Target::File(path) => write_table(&table, path).map_err(|e| failed(e.into()))?,
    }

    Ok(TableSummary::new(query, &table, target.label()))
}

fn write_stdout(table: &Table) -> Result<(), VantageError> {
    let stdout = std::io::stdout();
    write_table_to(table, stdout.lock()).map_err(|source| {
        VantageError::Write(WriteError::Csv {
            path: PathBuf::from("<stdout>"),
            source,
        })
    })
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};

    use clap::Parser;
    use vantage_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

    use super::*;

    const QUOTE_BODY: &str = r#"{"Global Quote": {
        "01. symbol": "IBM", "02. open": "1", "03. high": "2", "04. low": "0.5",
        "05. price": "1.5", "06. volume": "100", "07. latest trading day": "2024-01-02",
        "08. previous close": "1.4", "09. change": "0.1", "10. change percent": "7.1429%"}}"#;

    #[derive(Debug)]
    struct RecordingHttpClient {
        body: &'static str,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .len()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let body = self.body;
            Box::pin(async move { Ok(HttpResponse::ok(body)) })
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid args")
    }

    fn client(http: Arc<RecordingHttpClient>) -> AlphaVantageClient {
        AlphaVantageClient::with_http_client(http, ClientConfig::default()).expect("valid config")
    }

    #[test]
    fn single_symbol_uses_function_file_name() {
        let cli = parse(&["vantage", "quote", "IBM"]);
        let queries = plan(&cli).expect("valid plan");

        let targets = targets(&cli, &queries).expect("valid targets");

        assert_eq!(targets, [Target::File(PathBuf::from("GLOBAL_QUOTE.csv"))]);
    }

    #[test]
    fn several_symbols_get_per_symbol_file_names() {
        let cli = parse(&["vantage", "series", "IBM", "MSFT", "--output-dir", "out"]);
        let queries = plan(&cli).expect("valid plan");

        let targets = targets(&cli, &queries).expect("valid targets");

        assert_eq!(
            targets,
            [
                Target::File(PathBuf::from("out").join("TIME_SERIES_DAILY_IBM.csv")),
                Target::File(PathBuf::from("out").join("TIME_SERIES_DAILY_MSFT.csv")),
            ]
        );
    }

    #[test]
    fn explicit_output_requires_a_single_symbol() {
        let cli = parse(&["vantage", "quote", "IBM", "MSFT", "--output", "q.csv"]);
        let queries = plan(&cli).expect("valid plan");

        assert!(matches!(targets(&cli, &queries), Err(CliError::Command(_))));
    }

    #[test]
    fn flags_override_environment_config() {
        let cli = parse(&[
            "vantage",
            "quote",
            "IBM",
            "--apikey",
            "flag-key",
            "--base-url",
            "http://localhost:9/query",
            "--timeout-ms",
            "250",
        ]);

        let config = client_config(&cli);

        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.base_url, "http://localhost:9/query");
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn with_close_adds_the_close_column() {
        let cli = parse(&["vantage", "intraday", "IBM", "--with-close"]);
        let decoder = decoder(&cli).expect("valid decoder");
        assert_eq!(decoder.intraday_fields(), IntradayField::OHLCV);
    }

    #[tokio::test]
    async fn writes_quote_table_into_output_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().join("data");
        let out_arg = out.to_string_lossy().into_owned();
        let cli = parse(&["vantage", "quote", "IBM", "--datatype", "json", "--output-dir", &out_arg]);
        let http = Arc::new(RecordingHttpClient::new(QUOTE_BODY));

        execute(&cli, &client(http.clone())).await.expect("run succeeds");

        let written = std::fs::read_to_string(out.join("GLOBAL_QUOTE.csv")).expect("file written");
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("Symbol,Open,High,Low,Price,Volume,Latest trading day,Previous close,Change,Change percent")
        );
        assert_eq!(
            lines.next(),
            Some("IBM,1,2,0.5,1.5,100,2024-01-02,1.4,0.1,7.1429%")
        );
        assert_eq!(http.request_count(), 1);
    }

    #[tokio::test]
    async fn invalid_symbol_sends_no_requests() {
        let cli = parse(&["vantage", "quote", "IBM", "not/valid", "--stdout"]);
        let http = Arc::new(RecordingHttpClient::new(QUOTE_BODY));

        let err = execute(&cli, &client(http.clone()))
            .await
            .expect_err("symbol is invalid");

        assert_eq!(err.exit_code(), 2);
        assert_eq!(http.request_count(), 0);
    }

    #[tokio::test]
    async fn failures_in_a_batch_are_counted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out_arg = dir.path().to_string_lossy().into_owned();
        let cli = parse(&[
            "vantage",
            "quote",
            "IBM",
            "MSFT",
            "--datatype",
            "json",
            "--output-dir",
            &out_arg,
        ]);
        let http = Arc::new(RecordingHttpClient::new(r#"{"Note": "rate limited"}"#));

        let err = execute(&cli, &client(http.clone()))
            .await
            .expect_err("every fetch is rejected");

        assert!(matches!(
            err,
            CliError::Incomplete {
                failed: 2,
                total: 2,
                code: 4
            }
        ));
        assert_eq!(http.request_count(), 2);
    }
}
