use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Output

// {
//      "name": "Historical PE Ratio",
//      "points": [
//          { "date": "2024-01-22", "value": 31.77 },
//          { "date": "2024-01-23", "value": null },
//          ...
//      ]
// }
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RatioPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A derived, date-indexed ratio. `None` marks a day the ratio is undefined.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RatioSeries {
    pub name: String,
    pub points: Vec<RatioPoint>,
}

impl RatioSeries {
    pub fn new(name: impl Into<String>, points: Vec<RatioPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, vec![])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|point| point.date)
    }

    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|point| point.value)
    }

    /// Defined, finite values only.
    pub fn defined(&self) -> impl Iterator<Item = f64> + '_ {
        self.values().flatten().filter(|value| value.is_finite())
    }

    /// True when there is nothing to plot: no points, or only undefined ones.
    pub fn has_no_values(&self) -> bool {
        self.defined().next().is_none()
    }

    /// Mean over the defined values; undefined days are skipped, not zeroed.
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .defined()
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.defined().fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
    }
}
