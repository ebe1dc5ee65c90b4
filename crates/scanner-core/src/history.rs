use crate::api::Provider;
use crate::error::Result;
use crate::schema::{Period, PriceSeries, RatioPoint, RatioSeries};
use std::fmt;
use tracing::{debug, info, warn};

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Historical P/E reconstruction
//
// Yahoo only exposes the current trailing EPS, so every close in the window is divided by that one
// figure. The result assumes EPS held constant over the whole window, which drifts from the truth
// around earnings releases.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

pub const PE_SERIES_NAME: &str = "Historical PE Ratio";

/// Why a ratio could not be computed for any day of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Undefined {
    EpsMissing,
    EpsNotPositive(f64),
}

impl fmt::Display for Undefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Undefined::EpsMissing => write!(f, "trailing EPS is missing"),
            Undefined::EpsNotPositive(eps) => write!(f, "trailing EPS is not positive ({eps})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reconstruction {
    /// One defined ratio per session.
    Computed(RatioSeries),
    /// Same dates as the prices, every value `None`.
    Undefined {
        series: RatioSeries,
        reason: Undefined,
    },
    /// The provider returned no sessions for the window.
    NoData,
}

impl Reconstruction {
    /// `None` only for [`Reconstruction::NoData`].
    pub fn series(&self) -> Option<&RatioSeries> {
        match self {
            Reconstruction::Computed(series) | Reconstruction::Undefined { series, .. } => {
                Some(series)
            }
            Reconstruction::NoData => None,
        }
    }

    /// Collapse to a series; `NoData` becomes an empty one.
    pub fn into_series(self) -> RatioSeries {
        match self {
            Reconstruction::Computed(series) | Reconstruction::Undefined { series, .. } => series,
            Reconstruction::NoData => RatioSeries::empty(PE_SERIES_NAME),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Reconstruction::Computed(_))
    }
}

/// Divide each close by `trailing_eps`.
pub fn reconstruct(prices: &PriceSeries, trailing_eps: Option<f64>) -> Reconstruction {
    if prices.is_empty() {
        return Reconstruction::NoData;
    }

    let reason = match trailing_eps {
        Some(eps) if eps > 0.0 => {
            let points = prices
                .points()
                .iter()
                .map(|price| RatioPoint {
                    date: price.date,
                    value: Some(price.close / eps),
                })
                .collect();
            return Reconstruction::Computed(RatioSeries::new(PE_SERIES_NAME, points));
        }
        Some(eps) => Undefined::EpsNotPositive(eps),
        None => Undefined::EpsMissing,
    };

    let points = prices
        .points()
        .iter()
        .map(|price| RatioPoint {
            date: price.date,
            value: None,
        })
        .collect();
    Reconstruction::Undefined {
        series: RatioSeries::new(PE_SERIES_NAME, points),
        reason,
    }
}

/// Fetch `period` of closes and the current trailing EPS for `ticker`, then
/// reconstruct its P/E history.
///
/// Empty price history and missing / non-positive EPS are reported through
/// the returned [`Reconstruction`]; only provider failures are errors.
pub async fn historical_pe<P>(provider: &P, ticker: &str, period: Period) -> Result<Reconstruction>
where
    P: Provider + ?Sized,
{
    let prices = provider.price_history(ticker, period).await?;
    if prices.is_empty() {
        warn!("[{ticker}] no price history over {period}");
        return Ok(Reconstruction::NoData);
    }

    let fundamentals = provider.fundamentals(ticker).await?;
    let reconstruction = reconstruct(&prices, fundamentals.eps());
    match &reconstruction {
        Reconstruction::Undefined { reason, .. } => {
            warn!("[{ticker}] cannot compute P/E: {reason}")
        }
        Reconstruction::Computed(series) => {
            debug!("[{ticker}] {} P/E points reconstructed", series.len());
            info!("[{ticker}] historical P/E assumes a constant trailing EPS over {period}");
        }
        Reconstruction::NoData => {}
    }

    Ok(reconstruction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::schema::FundamentalsRecord;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn prices(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .zip(start.iter_days())
            .map(|(close, date)| (date, *close))
            .collect()
    }

    #[test]
    fn divides_each_close_by_eps() {
        let prices = prices(&[100.0, 102.0, 101.0, 105.0, 110.0]);
        let reconstruction = reconstruct(&prices, Some(5.0));

        let series = match reconstruction {
            Reconstruction::Computed(series) => series,
            other => panic!("expected a computed series, got {other:?}"),
        };
        assert_eq!(series.name, PE_SERIES_NAME);
        let values: Vec<Option<f64>> = series.values().collect();
        assert_eq!(
            values,
            vec![Some(20.0), Some(20.4), Some(20.2), Some(21.0), Some(22.0)]
        );
    }

    #[test]
    fn dates_survive_in_order() {
        let prices = prices(&[10.0, 11.0, 12.0, 13.0]);
        let input: Vec<NaiveDate> = prices.points().iter().map(|p| p.date).collect();

        for eps in [Some(2.0), Some(0.0), Some(-1.0), None] {
            let series = reconstruct(&prices, eps).into_series();
            let output: Vec<NaiveDate> = series.dates().collect();
            assert_eq!(output, input, "eps = {eps:?}");
        }
    }

    #[test]
    fn empty_prices_give_no_data() {
        let reconstruction = reconstruct(&PriceSeries::default(), Some(5.0));
        assert_eq!(reconstruction, Reconstruction::NoData);
        assert!(reconstruction.series().is_none());
        assert!(reconstruction.into_series().is_empty());
    }

    #[test]
    fn zero_eps_is_undefined() {
        let prices = prices(&[100.0, 102.0, 101.0]);
        match reconstruct(&prices, Some(0.0)) {
            Reconstruction::Undefined { series, reason } => {
                assert_eq!(reason, Undefined::EpsNotPositive(0.0));
                assert_eq!(series.len(), 3);
                assert!(series.values().all(|v| v.is_none()));
            }
            other => panic!("expected undefined, got {other:?}"),
        }
    }

    #[test]
    fn negative_eps_is_undefined() {
        let prices = prices(&[100.0, 102.0]);
        let reconstruction = reconstruct(&prices, Some(-1.5));
        assert!(!reconstruction.is_computed());
        let series = reconstruction.series().unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.has_no_values());
    }

    #[test]
    fn missing_eps_is_undefined() {
        let prices = prices(&[100.0]);
        let Reconstruction::Undefined { reason, .. } = reconstruct(&prices, None) else {
            panic!("expected undefined");
        };
        assert_eq!(reason, Undefined::EpsMissing);
        assert_eq!(reason.to_string(), "trailing EPS is missing");
    }

    // ---------------------------------------------------------------------------------------------

    struct Canned {
        prices: PriceSeries,
        eps: Option<f64>,
        fundamentals_calls: AtomicUsize,
    }

    impl Canned {
        fn new(prices: PriceSeries, eps: Option<f64>) -> Self {
            Self {
                prices,
                eps,
                fundamentals_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Provider for Canned {
        async fn fundamentals(&self, _ticker: &str) -> Result<FundamentalsRecord> {
            self.fundamentals_calls.fetch_add(1, Ordering::SeqCst);
            Ok(FundamentalsRecord {
                trailing_eps: self.eps,
                ..Default::default()
            })
        }

        async fn price_history(&self, _ticker: &str, _period: Period) -> Result<PriceSeries> {
            Ok(self.prices.clone())
        }
    }

    struct Offline;

    #[async_trait]
    impl Provider for Offline {
        async fn fundamentals(&self, _ticker: &str) -> Result<FundamentalsRecord> {
            Err(ProviderError::EmptyCrumb)
        }

        async fn price_history(&self, _ticker: &str, _period: Period) -> Result<PriceSeries> {
            Err(ProviderError::Upstream {
                code: "Not Found".to_string(),
                description: "No data found, symbol may be delisted".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn provider_prices_and_eps_combine() {
        let provider = Canned::new(prices(&[100.0, 110.0]), Some(5.0));
        let reconstruction = historical_pe(&provider, "AAPL", Period::OneYear)
            .await
            .unwrap();
        let values: Vec<Option<f64>> = reconstruction.into_series().values().collect();
        assert_eq!(values, vec![Some(20.0), Some(22.0)]);
    }

    #[tokio::test]
    async fn empty_history_skips_fundamentals() {
        let provider = Canned::new(PriceSeries::default(), Some(5.0));
        let reconstruction = historical_pe(&provider, "AAPL", Period::OneYear)
            .await
            .unwrap();
        assert_eq!(reconstruction, Reconstruction::NoData);
        assert_eq!(provider.fundamentals_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let err = historical_pe(&Offline, "ZZZZ", Period::OneYear)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Upstream { .. }));
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let provider: Box<dyn Provider + Send + Sync> =
            Box::new(Canned::new(prices(&[50.0]), None));
        let reconstruction = historical_pe(provider.as_ref(), "AAPL", Period::SixMonths)
            .await
            .unwrap();
        assert!(matches!(
            reconstruction,
            Reconstruction::Undefined {
                reason: Undefined::EpsMissing,
                ..
            }
        ));
    }
}
