use super::common::{local_date, ApiError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Daily closing prices from Yahoo Finance's `chart` endpoint
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Lookback window, as Yahoo's `range` parameter spells it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Period; 11] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Period::ALL
            .into_iter()
            .find(|period| period.as_str() == code)
            .ok_or_else(|| {
                let valid: Vec<&str> = Period::ALL.iter().map(Period::as_str).collect();
                format!("unknown period \"{s}\", expected one of: {}", valid.join(", "))
            })
    }
}

// -------------------------------------------------------------------------------------------------
// Output

// [
//      { "date": "2024-01-22", "close": 193.89 },
//      { "date": "2024-01-23", "close": 195.18 },
//      ...
// ]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices, strictly increasing by date.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Sorts by date and collapses repeated dates, keeping the last row seen;
    /// Yahoo appends the live quote as an extra row for the current session.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|point| point.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

impl FromIterator<(NaiveDate, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self::from_points(
            iter.into_iter()
                .map(|(date, close)| PricePoint { date, close })
                .collect(),
        )
    }
}

// -------------------------------------------------------------------------------------------------
// Input: Yahoo Finance

// {
//    "chart": {
//        "result": [{
//            "meta": { "currency": "USD", "symbol": "AAPL", "gmtoffset": -18000, ... },
//            "timestamp": [1705933800, 1706020200, ...],
//            "indicators": {
//                "quote": [{ "open": [...], "close": [193.89, null, ...], ... }],
//                "adjclose": [{ "adjclose": [193.14, null, ...] }]
//            }
//        }],
//        "error": null
//    }
// }
#[derive(Deserialize, Debug)]
pub struct PriceHistory {
    pub chart: PriceResponse,
}

#[derive(Deserialize, Debug)]
pub struct PriceResponse {
    pub result: Option<Vec<PriceCategories>>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
pub struct PriceCategories {
    #[serde(default)]
    pub meta: Meta,
    // absent when the range holds no sessions
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug, Default)]
pub struct Meta {
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Vec<AdjClose>,
}

#[derive(Deserialize, Debug)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl PriceCategories {
    /// Pair each session's timestamp with its close.
    ///
    /// The adjusted close is preferred when Yahoo sends one for every session,
    /// so that splits and dividends do not show up as jumps in the series.
    /// Sessions with a `null` close are dropped.
    pub fn into_series(self) -> PriceSeries {
        let gmtoffset = self.meta.gmtoffset;
        let adjusted = self
            .indicators
            .adjclose
            .into_iter()
            .next()
            .map(|adj| adj.adjclose)
            .filter(|closes| closes.len() == self.timestamp.len());
        let closes = match adjusted {
            Some(closes) => closes,
            None => self
                .indicators
                .quote
                .into_iter()
                .next()
                .map(|quote| quote.close)
                .unwrap_or_default(),
        };

        self.timestamp
            .iter()
            .zip(closes)
            .filter_map(|(timestamp, close)| {
                let close = close.filter(|c| c.is_finite())?;
                let date = local_date(*timestamp, gmtoffset)?;
                Some((date, close))
            })
            .collect()
    }
}
