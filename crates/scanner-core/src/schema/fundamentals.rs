use super::common::{de_raw, ApiError};
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Fundamentals snapshot of a single ticker, from Yahoo Finance's `quoteSummary`
//
////////////////////////////////////////////////////////////////////////////////////////////////////

// Output

// {
//      "trailingPE": 29.51,
//      "trailingEps": 6.08,
//      "priceToBook": 47.3,
//      "enterpriseValue": 2912345000000,
//      "ebitda": 129629000000,
//      ...
// }
/// Typed snapshot of a company's fundamentals at fetch time.
///
/// Every field is optional; providers routinely omit attributes (banks have no
/// gross margin, loss-makers have no P/E) and that is not an error.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalsRecord {
    #[serde(rename = "trailingPE", default, deserialize_with = "de_raw")]
    pub trailing_pe: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub trailing_eps: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub price_to_book: Option<f64>,
    #[serde(
        rename = "priceToSalesTrailing12Months",
        default,
        deserialize_with = "de_raw"
    )]
    pub price_to_sales: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub enterprise_value: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub ebitda: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub return_on_equity: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub return_on_assets: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub debt_to_equity: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub current_ratio: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub quick_ratio: Option<f64>,
    #[serde(rename = "grossMargins", default, deserialize_with = "de_raw")]
    pub gross_margin: Option<f64>,
    #[serde(rename = "operatingMargins", default, deserialize_with = "de_raw")]
    pub operating_margin: Option<f64>,
    #[serde(rename = "profitMargins", default, deserialize_with = "de_raw")]
    pub profit_margin: Option<f64>,
    #[serde(rename = "freeCashflow", default, deserialize_with = "de_raw")]
    pub free_cash_flow: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub dividend_yield: Option<f64>,
}

// -------------------------------------------------------------------------------------------------
// Input

// {
//    "quoteSummary": {
//        "result": [
//            {
//                "summaryDetail": { "trailingPE": { "raw": 29.51, "fmt": "29.51" }, ... },
//                "defaultKeyStatistics": { "trailingEps": { "raw": 6.08, "fmt": "6.08" }, ... },
//                "financialData": { "ebitda": { "raw": 129629000000, "fmt": "129.63B" }, ... }
//            }
//        ],
//        "error": null
//    }
// }
#[derive(Deserialize, Debug)]
pub struct QuoteSummary {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryResponse,
}

#[derive(Deserialize, Debug)]
pub struct QuoteSummaryResponse {
    pub result: Option<Vec<QuoteSummaryModules>>,
    pub error: Option<ApiError>,
}

/// The three modules requested; see [`MODULES`].
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryModules {
    #[serde(default)]
    pub summary_detail: SummaryDetail,
    #[serde(default)]
    pub default_key_statistics: DefaultKeyStatistics,
    #[serde(default)]
    pub financial_data: FinancialData,
}

/// Value of the `modules` query parameter.
pub const MODULES: &str = "summaryDetail,defaultKeyStatistics,financialData";

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    #[serde(rename = "trailingPE", default, deserialize_with = "de_raw")]
    pub trailing_pe: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub price_to_sales_trailing12_months: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub dividend_yield: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DefaultKeyStatistics {
    #[serde(default, deserialize_with = "de_raw")]
    pub trailing_eps: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub price_to_book: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub enterprise_value: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(default, deserialize_with = "de_raw")]
    pub ebitda: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub return_on_equity: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub return_on_assets: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub debt_to_equity: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub current_ratio: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub quick_ratio: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub gross_margins: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub operating_margins: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub profit_margins: Option<f64>,
    #[serde(default, deserialize_with = "de_raw")]
    pub free_cashflow: Option<f64>,
}

impl From<QuoteSummaryModules> for FundamentalsRecord {
    fn from(modules: QuoteSummaryModules) -> Self {
        let QuoteSummaryModules {
            summary_detail: summary,
            default_key_statistics: stats,
            financial_data: financials,
        } = modules;

        Self {
            trailing_pe: summary.trailing_pe,
            trailing_eps: stats.trailing_eps,
            price_to_book: stats.price_to_book,
            price_to_sales: summary.price_to_sales_trailing12_months,
            enterprise_value: stats.enterprise_value,
            ebitda: financials.ebitda,
            return_on_equity: financials.return_on_equity,
            return_on_assets: financials.return_on_assets,
            debt_to_equity: financials.debt_to_equity,
            current_ratio: financials.current_ratio,
            quick_ratio: financials.quick_ratio,
            gross_margin: financials.gross_margins,
            operating_margin: financials.operating_margins,
            profit_margin: financials.profit_margins,
            free_cash_flow: financials.free_cashflow,
            dividend_yield: summary.dividend_yield,
        }
    }
}
