pub mod common;
pub mod fundamentals;
pub mod prices;
pub mod ratio;

pub use fundamentals::FundamentalsRecord;
pub use prices::{Period, PricePoint, PriceSeries};
pub use ratio::{RatioPoint, RatioSeries};
