//! Price-history payload types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily prices of the three market segments, UAH/MWh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDataPoint {
    pub date: NaiveDate,
    pub day_ahead: f64,
    pub intraday: f64,
    pub bilateral: f64,
}

/// Summary over the day-ahead prices of a period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub last_price: f64,
    /// Percent change from the first to the last price of the period.
    pub change: f64,
}

/// Where a price series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    #[serde(rename = "UEEX")]
    Ueex,
    #[serde(rename = "synthetic")]
    Synthetic,
}

/// Response body of the price-history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    pub data: Vec<PriceDataPoint>,
    pub stats: PriceStats,
    pub source: PriceSource,
    pub last_updated: DateTime<Utc>,
    /// Non-fatal explanation shown when synthetic data was substituted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
