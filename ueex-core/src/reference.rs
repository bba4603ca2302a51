//! Static reference data: exchange rate tables, bidding zones and defaults.
//!
//! Everything here is a compile-time constant. Rates are fixed by exchange
//! rules and are not user-editable.

use serde::Serialize;

use crate::models::enums::{AuctionType, TradeDirection};

/// VAT, fraction of the taxable base.
pub const VAT_RATE: f64 = 0.20;
pub const VAT_PERCENT: f64 = 20.0;
/// Special VAT regime for electricity, fraction of the base amount.
pub const SPECIAL_VAT_RATE: f64 = 0.07;
pub const SPECIAL_VAT_PERCENT: f64 = 7.0;

/// Transmission tariff offered by the calculator form, UAH/MWh.
pub const DEFAULT_TRANSMISSION_TARIFF: f64 = 320.55;
/// Distribution tariff offered by the calculator form, UAH/MWh.
pub const DEFAULT_DISTRIBUTION_TARIFF: f64 = 687.42;

/// Domain pre-selected for new time series.
pub const DEFAULT_DOMAIN: &str = "10Y1001C--000182";
/// Transmission system operator, the usual schedule receiver.
pub const DEFAULT_RECEIVER_EIC: &str = "10X1001A1001A450";

// ============================================================================
// Exchange rates
// ============================================================================

/// Commission and guarantee rates of one auction type, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionRates {
    pub auction_type: AuctionType,
    pub name: &'static str,
    pub commission_percent: f64,
    pub guarantee_buy_percent: f64,
    pub guarantee_sell_percent: f64,
}

impl AuctionRates {
    pub fn guarantee_percent(&self, direction: TradeDirection) -> f64 {
        match direction {
            TradeDirection::Buy => self.guarantee_buy_percent,
            TradeDirection::Sell => self.guarantee_sell_percent,
        }
    }
}

/// One row per [`AuctionType`], in [`AuctionType::ALL`] order.
pub const AUCTION_RATES: [AuctionRates; 4] = [
    AuctionRates {
        auction_type: AuctionType::Specialized,
        name: "Спеціалізований аукціон",
        commission_percent: 0.5,
        guarantee_buy_percent: 15.0,
        guarantee_sell_percent: 10.0,
    },
    AuctionRates {
        auction_type: AuctionType::Commercial,
        name: "Комерційна секція",
        commission_percent: 0.3,
        guarantee_buy_percent: 12.0,
        guarantee_sell_percent: 8.0,
    },
    AuctionRates {
        auction_type: AuctionType::Double,
        name: "Двосторонній безперервний",
        commission_percent: 0.25,
        guarantee_buy_percent: 10.0,
        guarantee_sell_percent: 5.0,
    },
    AuctionRates {
        auction_type: AuctionType::ExportImport,
        name: "Імпорт/Експорт",
        commission_percent: 0.6,
        guarantee_buy_percent: 20.0,
        guarantee_sell_percent: 15.0,
    },
];

impl AuctionType {
    pub fn rates(self) -> &'static AuctionRates {
        match self {
            Self::Specialized => &AUCTION_RATES[0],
            Self::Commercial => &AUCTION_RATES[1],
            Self::Double => &AUCTION_RATES[2],
            Self::ExportImport => &AUCTION_RATES[3],
        }
    }

    pub fn commission_percent(self) -> f64 {
        self.rates().commission_percent
    }

    pub fn guarantee_percent(self, direction: TradeDirection) -> f64 {
        self.rates().guarantee_percent(direction)
    }
}

// ============================================================================
// Bidding zones
// ============================================================================

/// A bidding zone / control area selectable as `in_Domain` or `out_Domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub code: &'static str,
    pub name: &'static str,
}

pub const DOMAINS: [Domain; 6] = [
    Domain { code: "10Y1001C--000182", name: "Україна (OEC)" },
    Domain { code: "10YUA-WEPS-----0", name: "Україна (УЕЕХ)" },
    Domain { code: "10YHU-MAVIR----U", name: "Угорщина" },
    Domain { code: "10YSK-SEPS-----K", name: "Словацька республіка" },
    Domain { code: "10YPL-AREA-----S", name: "Польща" },
    Domain { code: "10YRO-TEL------P", name: "Румунія" },
];
