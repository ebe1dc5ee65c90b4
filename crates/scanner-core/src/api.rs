use crate::error::Result;
use crate::schema::{FundamentalsRecord, Period, PriceSeries};
use async_trait::async_trait;

pub type HttpClient = reqwest::Client;

/// The two reads the scanner needs from a market-data provider.
///
/// Implementations are handed to every operation explicitly; nothing in the
/// crate holds a provider (or a ticker) in global state.
#[async_trait]
pub trait Provider {
    /// Current fundamentals snapshot for `ticker`.
    async fn fundamentals(&self, ticker: &str) -> Result<FundamentalsRecord>;

    /// Daily closes for `ticker` over `period`. An empty series means the
    /// provider had no sessions to report; it is not an error.
    async fn price_history(&self, ticker: &str, period: Period) -> Result<PriceSeries>;
}

/// HTTP client with a cookie jar; Yahoo ties its crumb to a session cookie.
pub fn build_client(user_agent: &str) -> Result<HttpClient> {
    let client = reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .cookie_store(true)
        .build()?;
    Ok(client)
}
