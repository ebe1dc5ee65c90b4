pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod history;
pub mod indicators;
pub mod schema;
pub mod yahoo;

pub mod prelude {
    pub use crate::api::{build_client, HttpClient, Provider};
    pub use crate::chart::Chart;
    pub use crate::config::Config;
    pub use crate::error::ProviderError;
    pub use crate::history::{historical_pe, reconstruct, Reconstruction, Undefined};
    pub use crate::indicators::{Indicator, Unit};
    pub use crate::schema::{FundamentalsRecord, Period, PriceSeries, RatioSeries};
    pub use crate::yahoo::YahooFinance;
}
