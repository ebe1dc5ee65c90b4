use crate::schema::FundamentalsRecord;
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Indicator extraction: projections of a fundamentals record
//
////////////////////////////////////////////////////////////////////////////////////////////////////

impl FundamentalsRecord {
    /// Price / Earnings (trailing).
    pub fn pe_ratio(&self) -> Option<f64> {
        self.trailing_pe
    }

    /// Earnings per share (trailing twelve months).
    pub fn eps(&self) -> Option<f64> {
        self.trailing_eps
    }

    /// Price / Book.
    pub fn pb_ratio(&self) -> Option<f64> {
        self.price_to_book
    }

    /// Price / Sales (trailing twelve months).
    pub fn ps_ratio(&self) -> Option<f64> {
        self.price_to_sales
    }

    /// Enterprise value / EBITDA; `None` unless both are present and EBITDA
    /// is non-zero.
    pub fn ev_ebitda(&self) -> Option<f64> {
        match (self.enterprise_value, self.ebitda) {
            (Some(ev), Some(ebitda)) if ebitda != 0.0 => Some(ev / ebitda),
            _ => None,
        }
    }

    pub fn roe(&self) -> Option<f64> {
        self.return_on_equity
    }

    pub fn roa(&self) -> Option<f64> {
        self.return_on_assets
    }

    pub fn de_ratio(&self) -> Option<f64> {
        self.debt_to_equity
    }

    pub fn current_ratio(&self) -> Option<f64> {
        self.current_ratio
    }

    /// Acid test.
    pub fn quick_ratio(&self) -> Option<f64> {
        self.quick_ratio
    }

    pub fn gross_margin(&self) -> Option<f64> {
        self.gross_margin
    }

    pub fn operating_margin(&self) -> Option<f64> {
        self.operating_margin
    }

    pub fn net_profit_margin(&self) -> Option<f64> {
        self.profit_margin
    }

    pub fn free_cash_flow(&self) -> Option<f64> {
        self.free_cash_flow
    }

    pub fn dividend_yield(&self) -> Option<f64> {
        self.dividend_yield
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    PeRatio,
    Eps,
    PbRatio,
    PsRatio,
    EvEbitda,
    Roe,
    Roa,
    DeRatio,
    CurrentRatio,
    QuickRatio,
    GrossMargin,
    OperatingMargin,
    NetProfitMargin,
    FreeCashFlow,
    DividendYield,
}

/// How a value reads: Yahoo sends margins and returns as fractions, and cash
/// amounts in the reporting currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Ratio,
    Percent,
    Money,
}

impl Indicator {
    pub const ALL: [Indicator; 15] = [
        Indicator::PeRatio,
        Indicator::Eps,
        Indicator::PbRatio,
        Indicator::PsRatio,
        Indicator::EvEbitda,
        Indicator::Roe,
        Indicator::Roa,
        Indicator::DeRatio,
        Indicator::CurrentRatio,
        Indicator::QuickRatio,
        Indicator::GrossMargin,
        Indicator::OperatingMargin,
        Indicator::NetProfitMargin,
        Indicator::FreeCashFlow,
        Indicator::DividendYield,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::PeRatio => "P/E",
            Indicator::Eps => "EPS",
            Indicator::PbRatio => "P/B",
            Indicator::PsRatio => "P/S",
            Indicator::EvEbitda => "EV/EBITDA",
            Indicator::Roe => "ROE",
            Indicator::Roa => "ROA",
            Indicator::DeRatio => "Debt/Equity",
            Indicator::CurrentRatio => "Current Ratio",
            Indicator::QuickRatio => "Quick Ratio",
            Indicator::GrossMargin => "Gross Margin",
            Indicator::OperatingMargin => "Operating Margin",
            Indicator::NetProfitMargin => "Net Profit Margin",
            Indicator::FreeCashFlow => "Free Cash Flow",
            Indicator::DividendYield => "Dividend Yield",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Indicator::Roe
            | Indicator::Roa
            | Indicator::GrossMargin
            | Indicator::OperatingMargin
            | Indicator::NetProfitMargin
            | Indicator::DividendYield => Unit::Percent,
            Indicator::FreeCashFlow => Unit::Money,
            _ => Unit::Ratio,
        }
    }

    pub fn value(&self, record: &FundamentalsRecord) -> Option<f64> {
        match self {
            Indicator::PeRatio => record.pe_ratio(),
            Indicator::Eps => record.eps(),
            Indicator::PbRatio => record.pb_ratio(),
            Indicator::PsRatio => record.ps_ratio(),
            Indicator::EvEbitda => record.ev_ebitda(),
            Indicator::Roe => record.roe(),
            Indicator::Roa => record.roa(),
            Indicator::DeRatio => record.de_ratio(),
            Indicator::CurrentRatio => record.current_ratio(),
            Indicator::QuickRatio => record.quick_ratio(),
            Indicator::GrossMargin => record.gross_margin(),
            Indicator::OperatingMargin => record.operating_margin(),
            Indicator::NetProfitMargin => record.net_profit_margin(),
            Indicator::FreeCashFlow => record.free_cash_flow(),
            Indicator::DividendYield => record.dividend_yield(),
        }
    }

    /// `"n/a"` when the record has no value for this indicator.
    pub fn display(&self, record: &FundamentalsRecord) -> String {
        match self.value(record) {
            Some(value) => self.unit().format(value),
            None => "n/a".to_string(),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Unit {
    pub fn format(&self, value: f64) -> String {
        match self {
            Unit::Ratio => format!("{value:.2}"),
            Unit::Percent => format!("{:.2}%", value * 100.0),
            Unit::Money => {
                let magnitude = value.abs();
                let (scaled, suffix) = if magnitude >= 1e12 {
                    (value / 1e12, "T")
                } else if magnitude >= 1e9 {
                    (value / 1e9, "B")
                } else if magnitude >= 1e6 {
                    (value / 1e6, "M")
                } else if magnitude >= 1e3 {
                    (value / 1e3, "K")
                } else {
                    (value, "")
                };
                format!("{scaled:.2}{suffix}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FundamentalsRecord {
        FundamentalsRecord {
            enterprise_value: Some(1000.0),
            ebitda: Some(100.0),
            ..Default::default()
        }
    }

    #[test]
    fn ev_ebitda_divides() {
        assert_eq!(record().ev_ebitda(), Some(10.0));
    }

    #[test]
    fn ev_ebitda_without_ebitda() {
        let record = FundamentalsRecord {
            ebitda: None,
            ..record()
        };
        assert_eq!(record.ev_ebitda(), None);
    }

    #[test]
    fn ev_ebitda_without_enterprise_value() {
        let record = FundamentalsRecord {
            enterprise_value: None,
            ..record()
        };
        assert_eq!(record.ev_ebitda(), None);
    }

    #[test]
    fn ev_ebitda_zero_ebitda() {
        let record = FundamentalsRecord {
            ebitda: Some(0.0),
            ..record()
        };
        assert_eq!(record.ev_ebitda(), None);
    }

    #[test]
    fn ev_ebitda_negative_ebitda_is_a_value() {
        let record = FundamentalsRecord {
            ebitda: Some(-50.0),
            ..record()
        };
        assert_eq!(record.ev_ebitda(), Some(-20.0));
    }

    #[test]
    fn projections_read_their_fields() {
        let record = FundamentalsRecord {
            trailing_pe: Some(29.5),
            trailing_eps: Some(6.08),
            price_to_book: Some(47.3),
            price_to_sales: Some(7.5),
            return_on_equity: Some(1.56),
            return_on_assets: Some(0.22),
            debt_to_equity: Some(151.9),
            current_ratio: Some(0.87),
            quick_ratio: Some(0.83),
            gross_margin: Some(0.46),
            operating_margin: Some(0.31),
            profit_margin: Some(0.26),
            free_cash_flow: Some(8.4e10),
            dividend_yield: Some(0.0044),
            ..record()
        };

        assert_eq!(record.pe_ratio(), Some(29.5));
        assert_eq!(record.eps(), Some(6.08));
        assert_eq!(record.pb_ratio(), Some(47.3));
        assert_eq!(record.ps_ratio(), Some(7.5));
        assert_eq!(record.roe(), Some(1.56));
        assert_eq!(record.roa(), Some(0.22));
        assert_eq!(record.de_ratio(), Some(151.9));
        assert_eq!(record.current_ratio(), Some(0.87));
        assert_eq!(record.quick_ratio(), Some(0.83));
        assert_eq!(record.gross_margin(), Some(0.46));
        assert_eq!(record.operating_margin(), Some(0.31));
        assert_eq!(record.net_profit_margin(), Some(0.26));
        assert_eq!(record.free_cash_flow(), Some(8.4e10));
        assert_eq!(record.dividend_yield(), Some(0.0044));
    }

    #[test]
    fn empty_record_has_no_values() {
        let record = FundamentalsRecord::default();
        for indicator in Indicator::ALL {
            assert_eq!(indicator.value(&record), None, "{indicator}");
            assert_eq!(indicator.display(&record), "n/a");
        }
    }

    #[test]
    fn display_by_unit() {
        let record = FundamentalsRecord {
            trailing_pe: Some(29.514),
            gross_margin: Some(0.45586),
            free_cash_flow: Some(84_726_000_000.0),
            ..record()
        };
        assert_eq!(Indicator::PeRatio.display(&record), "29.51");
        assert_eq!(Indicator::GrossMargin.display(&record), "45.59%");
        assert_eq!(Indicator::FreeCashFlow.display(&record), "84.73B");
        assert_eq!(Indicator::EvEbitda.display(&record), "10.00");
        assert_eq!(Unit::Money.format(-2_500_000.0), "-2.50M");
        assert_eq!(Unit::Money.format(512.0), "512.00");
    }
}
