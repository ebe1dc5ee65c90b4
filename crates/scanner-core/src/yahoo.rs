use crate::api::{build_client, HttpClient, Provider};
use crate::config::Config;
use crate::error::{ProviderError, Result};
use crate::schema::common::ApiError;
use crate::schema::fundamentals::{QuoteSummary, MODULES};
use crate::schema::prices::PriceHistory;
use crate::schema::{FundamentalsRecord, Period, PriceSeries};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, error, trace, warn};

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Yahoo Finance
//
//      prices:         GET {query}/v8/finance/chart/{TICKER}
//      fundamentals:   GET {cookie}                                (session cookie)
//                      GET {query}/v1/test/getcrumb                (crumb for that cookie)
//                      GET {query}/v10/finance/quoteSummary/{TICKER}?crumb=...
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// `chart.error.code` when the symbol has no price history.
const NO_DATA_CODE: &str = "Not Found";

pub struct YahooFinance {
    http_client: HttpClient,
    config: Config,
    crumb: OnceCell<String>,
}

impl YahooFinance {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = build_client(&config.user_agent)?;
        Ok(Self::with_client(http_client, config))
    }

    /// The client must keep cookies, or the crumb will be rejected.
    pub fn with_client(http_client: HttpClient, config: Config) -> Self {
        Self {
            http_client,
            config,
            crumb: OnceCell::new(),
        }
    }

    /// Fetched once per provider, then reused.
    async fn crumb(&self) -> Result<&str> {
        self.crumb
            .get_or_try_init(|| async {
                // the cookie endpoint answers 404; only its Set-Cookie matters
                trace!("requesting session cookie from {}", self.config.cookie_url);
                self.http_client
                    .get(&self.config.cookie_url)
                    .send()
                    .await?;

                let url = format!("{}/v1/test/getcrumb", self.config.query_url);
                trace!("requesting crumb from {url}");
                let response = self.http_client.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    error!("crumb request failed with status {status}\nURL: {url}");
                    return Err(ProviderError::Status { status, url });
                }

                let crumb = response.text().await?.trim().to_string();
                if crumb.is_empty() || crumb.contains('<') {
                    return Err(ProviderError::EmptyCrumb);
                }
                debug!("crumb acquired");
                Ok::<_, ProviderError>(crumb)
            })
            .await
            .map(String::as_str)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            error!("fetching error: {e}\nURL: {url}");
            e
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("byte transformation error: {e}\nURL: {url}");
            e
        })?;

        // Yahoo reports unknown tickers as a 404 with a JSON error object,
        // so the body is worth decoding whatever the status
        match serde_json::from_slice::<T>(&body) {
            Ok(data) => Ok(data),
            Err(_) if !status.is_success() => {
                error!("unexpected status {status}\nURL: {url}");
                Err(ProviderError::Status {
                    status,
                    url: url.to_string(),
                })
            }
            Err(e) => {
                error!("deserialization error: {e}\nURL: {url}");
                Err(e.into())
            }
        }
    }
}

fn upstream(ticker: &str, e: ApiError) -> ProviderError {
    error!("[{ticker}] provider error: {} ({})", e.description, e.code);
    ProviderError::Upstream {
        code: e.code,
        description: e.description,
    }
}

#[async_trait]
impl Provider for YahooFinance {
    async fn fundamentals(&self, ticker: &str) -> Result<FundamentalsRecord> {
        let tckr = ticker.to_uppercase();
        let crumb = self.crumb().await?;

        let url = format!("{}/v10/finance/quoteSummary/{tckr}", self.config.query_url);
        let request = self
            .http_client
            .get(&url)
            .query(&[("modules", MODULES), ("crumb", crumb)]);

        trace!("fetching fundamentals for [{tckr}]");
        let summary: QuoteSummary = self.fetch_json(request, &url).await?;
        if let Some(e) = summary.quote_summary.error {
            return Err(upstream(&tckr, e));
        }

        match summary.quote_summary.result.and_then(|r| r.into_iter().next()) {
            Some(modules) => {
                trace!("fundamentals fetched & deserialized for [{tckr}]");
                Ok(FundamentalsRecord::from(modules))
            }
            None => {
                warn!("[{tckr}] contained no \"quoteSummary.result\" object; every field is empty");
                Ok(FundamentalsRecord::default())
            }
        }
    }

    async fn price_history(&self, ticker: &str, period: Period) -> Result<PriceSeries> {
        let tckr = ticker.to_uppercase();
        let url = format!("{}/v8/finance/chart/{tckr}", self.config.query_url);
        let request = self.http_client.get(&url).query(&[
            ("symbol", tckr.as_str()),
            ("interval", "1d"),
            ("range", period.as_str()),
            ("events", "div|split"),
        ]);

        trace!("fetching {period} of prices for [{tckr}]");
        let history: PriceHistory = self.fetch_json(request, &url).await?;
        match history.chart.error {
            // Yahoo's answer for a delisted symbol or a window without sessions
            Some(e) if e.code == NO_DATA_CODE => {
                warn!("[{tckr}] no sessions over {period}: {}", e.description);
                return Ok(PriceSeries::default());
            }
            Some(e) => return Err(upstream(&tckr, e)),
            None => {}
        }

        match history.chart.result.and_then(|r| r.into_iter().next()) {
            Some(categories) => {
                let series = categories.into_series();
                debug!("[{tckr}] {} sessions fetched over {period}", series.len());
                Ok(series)
            }
            None => {
                warn!("[{tckr}] contained no \"chart.result\" object; returning an empty series");
                Ok(PriceSeries::default())
            }
        }
    }
}
