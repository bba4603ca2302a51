//! Strongly-typed enums for calculator inputs and schedule document codes.
//!
//! Serde `rename` attributes match the JSON form values and the ENTSO-E code
//! lists exactly, so the same strings flow from the HTTP boundary into the
//! generated XML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Calculator Enums
// ============================================================================

/// UEEX trading segment. Selects the commission rate and the pair of
/// guarantee-deposit rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuctionType {
    #[default]
    #[serde(rename = "specialized")]
    Specialized,
    #[serde(rename = "commercial")]
    Commercial,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "export_import")]
    ExportImport,
}

impl AuctionType {
    pub const ALL: [AuctionType; 4] = [
        Self::Specialized,
        Self::Commercial,
        Self::Double,
        Self::ExportImport,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Specialized => "specialized",
            Self::Commercial => "commercial",
            Self::Double => "double",
            Self::ExportImport => "export_import",
        }
    }
}

impl fmt::Display for AuctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AuctionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| format!("unknown auction type: {s}"))
    }
}

/// Side of the trade. Buyers pay network tariffs; sellers never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TradeDirection {
    #[serde(rename = "buy")]
    Buy,
    #[default]
    #[serde(rename = "sell")]
    Sell,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for TradeDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(format!("unknown trade direction: {other}")),
        }
    }
}

// ============================================================================
// Schedule Document Enums
// ============================================================================

/// `process.processType` of a Schedule_MarketDocument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProcessType {
    /// Day-ahead market (РДН).
    #[default]
    #[serde(rename = "A01")]
    DayAhead,
    /// Intraday market (ВДР).
    #[serde(rename = "A18")]
    Intraday,
    /// Bilateral contracts.
    #[serde(rename = "A05")]
    Bilateral,
}

impl ProcessType {
    pub const ALL: [ProcessType; 3] = [Self::DayAhead, Self::Intraday, Self::Bilateral];

    pub fn code(self) -> &'static str {
        match self {
            Self::DayAhead => "A01",
            Self::Intraday => "A18",
            Self::Bilateral => "A05",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::DayAhead => "Ринок на добу наперед (РДН)",
            Self::Intraday => "Внутрішньодобовий ринок (ВДР)",
            Self::Bilateral => "Двосторонні договори",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ProcessType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| format!("unknown process type: {s}"))
    }
}

/// `marketRole.type` of a sender or receiver participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketRole {
    #[serde(rename = "A01")]
    Producer,
    #[serde(rename = "A02")]
    Supplier,
    #[serde(rename = "A04")]
    SystemOperator,
    #[serde(rename = "A06")]
    Consumer,
    #[serde(rename = "A08")]
    Trader,
    #[serde(rename = "A32")]
    MarketOperator,
}

impl MarketRole {
    /// Roles offered for the document sender.
    pub const SENDER_ROLES: [MarketRole; 4] =
        [Self::Producer, Self::Supplier, Self::Consumer, Self::Trader];
    /// Roles offered for the document receiver.
    pub const RECEIVER_ROLES: [MarketRole; 2] = [Self::SystemOperator, Self::MarketOperator];

    pub fn code(self) -> &'static str {
        match self {
            Self::Producer => "A01",
            Self::Supplier => "A02",
            Self::SystemOperator => "A04",
            Self::Consumer => "A06",
            Self::Trader => "A08",
            Self::MarketOperator => "A32",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Producer => "Виробник",
            Self::Supplier => "Постачальник",
            Self::SystemOperator => "Системний оператор",
            Self::Consumer => "Споживач",
            Self::Trader => "Трейдер",
            Self::MarketOperator => "Оператор ринку",
        }
    }
}

impl fmt::Display for MarketRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MarketRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SENDER_ROLES
            .into_iter()
            .chain(Self::RECEIVER_ROLES)
            .find(|r| r.code() == s)
            .ok_or_else(|| format!("unknown market role: {s}"))
    }
}

// ============================================================================
// Price History Enums
// ============================================================================

/// Look-back window of the price-history chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePeriod {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
}

impl PricePeriod {
    /// Number of calendar days kept by the period filter.
    pub fn days(self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }
}

impl fmt::Display for PricePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
        }
    }
}

impl FromStr for PricePeriod {
    type Err = std::convert::Infallible;
    /// Unrecognised periods fall back to a month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "day" => Self::Day,
            "week" => Self::Week,
            "quarter" => Self::Quarter,
            _ => Self::Month,
        })
    }
}
