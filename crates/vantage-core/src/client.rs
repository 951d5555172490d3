use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::decode::{Decoder, RawResponse};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{
    ClientConfig, Datatype, Function, IntradayInterval, Query, Symbol, Table, ValidationError,
    VantageError,
};

const REJECTION_SNIPPET_LEN: usize = 200;

/// Fetches reports from the remote API and normalizes them into tables.
///
/// Each call is one independent fetch-decode sequence: nothing is cached or
/// shared between calls, and failures are never retried.
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    config: ClientConfig,
    decoder: Decoder,
}

impl AlphaVantageClient {
    /// Client backed by reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, ValidationError> {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(
        http_client: Arc<dyn HttpClient>,
        config: ClientConfig,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            http_client,
            config,
            decoder: Decoder::default(),
        })
    }

    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one query: build the URL, GET it, check the answer, decode it.
    pub async fn fetch(&self, query: &Query) -> Result<Table, VantageError> {
        let base_url = self.config.base_url.as_str();
        debug!(url = %query.redacted_url(base_url), "dispatching request");

        let request = HttpRequest::get(query.url(base_url, &self.config.api_key))
            .with_timeout_ms(self.config.timeout_ms);
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            warn!(
                status = response.status,
                function = %query.function(),
                symbol = %query.symbol(),
                "remote returned non-success status"
            );
            return Err(VantageError::Rejected {
                status: response.status,
                message: snippet(&response.body),
            });
        }

        if let Some(message) = api_message(&response.body) {
            warn!(
                function = %query.function(),
                symbol = %query.symbol(),
                "remote answered with a message instead of data"
            );
            return Err(VantageError::Rejected {
                status: response.status,
                message,
            });
        }

        let raw = RawResponse::new(&response.body, query.datatype(), query.shape());
        let table = self.decoder.decode(raw)?;

        info!(
            function = %query.function(),
            symbol = %query.symbol(),
            rows = table.row_count(),
            "fetched table"
        );
        Ok(table)
    }

    /// Intraday series. The interval is checked before any request is sent.
    pub async fn time_series_intraday(
        &self,
        symbol: &str,
        interval_minutes: u32,
        datatype: Datatype,
    ) -> Result<Table, VantageError> {
        let interval = IntradayInterval::try_from(interval_minutes)?;
        let query = Query::intraday(Symbol::parse(symbol)?, interval).with_datatype(datatype)?;
        self.fetch(&query).await
    }

    pub async fn time_series_daily(&self, symbol: &str) -> Result<Table, VantageError> {
        self.series(Function::TimeSeriesDaily, symbol).await
    }

    pub async fn time_series_daily_adjusted(&self, symbol: &str) -> Result<Table, VantageError> {
        self.series(Function::TimeSeriesDailyAdjusted, symbol).await
    }

    pub async fn time_series_weekly(&self, symbol: &str) -> Result<Table, VantageError> {
        self.series(Function::TimeSeriesWeekly, symbol).await
    }

    pub async fn time_series_weekly_adjusted(&self, symbol: &str) -> Result<Table, VantageError> {
        self.series(Function::TimeSeriesWeeklyAdjusted, symbol).await
    }

    pub async fn time_series_monthly(&self, symbol: &str) -> Result<Table, VantageError> {
        self.series(Function::TimeSeriesMonthly, symbol).await
    }

    pub async fn time_series_monthly_adjusted(&self, symbol: &str) -> Result<Table, VantageError> {
        self.series(Function::TimeSeriesMonthlyAdjusted, symbol).await
    }

    pub async fn global_quote(
        &self,
        symbol: &str,
        datatype: Datatype,
    ) -> Result<Table, VantageError> {
        let query = Query::new(Function::GlobalQuote, Symbol::parse(symbol)?)?
            .with_datatype(datatype)?;
        self.fetch(&query).await
    }

    async fn series(&self, function: Function, symbol: &str) -> Result<Table, VantageError> {
        let query = Query::new(function, Symbol::parse(symbol)?)?;
        self.fetch(&query).await
    }
}

/// Informational bodies the API sends with status 200 in place of data.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(rename = "Error Message")]
    error: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

fn api_message(body: &[u8]) -> Option<String> {
    let first = body.iter().find(|byte| !byte.is_ascii_whitespace())?;
    if *first != b'{' {
        return None;
    }

    let message: ApiMessage = serde_json::from_slice(body).ok()?;
    message.error.or(message.note).or(message.information)
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    match trimmed.char_indices().nth(REJECTION_SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_owned(),
    }
}
