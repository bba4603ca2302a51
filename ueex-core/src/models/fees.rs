//! Fee calculator request and result types.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::enums::{AuctionType, TradeDirection};
use crate::errors::RequestError;
use crate::reference::{DEFAULT_DISTRIBUTION_TARIFF, DEFAULT_TRANSMISSION_TARIFF};

/// Inclusive bounds of `hours_count` (one hour up to a 31-day month).
pub const MIN_HOURS: u32 = 1;
pub const MAX_HOURS: u32 = 744;

/// Largest trade value or tariff cost accepted, UAH. Keeps every derived
/// amount finite and inside the [`Decimal`] range of the rounded view.
pub const MAX_AMOUNT: f64 = 1e15;

// ============================================================================
// FeeRequest
// ============================================================================

/// Trade parameters entered in the calculator form.
///
/// Missing JSON fields take the form defaults (see [`FeeRequest::default`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeRequest {
    /// Power per hour, MW.
    #[serde(rename = "volumeMW")]
    pub volume_mw: f64,
    pub hours_count: u32,
    /// UAH per MWh.
    #[serde(rename = "pricePerMWh")]
    pub price_per_mwh: f64,
    pub auction_type: AuctionType,
    pub trade_direction: TradeDirection,
    #[serde(rename = "includeVAT")]
    pub include_vat: bool,
    #[serde(rename = "includeSpecialVAT")]
    pub include_special_vat: bool,
    /// UAH per MWh, buyers only.
    pub transmission_tariff: f64,
    pub include_transmission: bool,
    /// UAH per MWh, buyers only.
    pub distribution_tariff: f64,
    pub include_distribution: bool,
}

impl Default for FeeRequest {
    fn default() -> Self {
        Self {
            volume_mw: 100.0,
            hours_count: 24,
            price_per_mwh: 3500.0,
            auction_type: AuctionType::Specialized,
            trade_direction: TradeDirection::Sell,
            include_vat: true,
            include_special_vat: false,
            transmission_tariff: DEFAULT_TRANSMISSION_TARIFF,
            include_transmission: false,
            distribution_tariff: DEFAULT_DISTRIBUTION_TARIFF,
            include_distribution: false,
        }
    }
}

impl FeeRequest {
    /// Boundary check for values arriving from outside the process.
    ///
    /// [`crate::fees::compute_fees`] never fails; this is what the HTTP layer
    /// calls before it.
    pub fn validate(&self) -> Result<(), RequestError> {
        let amounts = [
            ("volumeMW", self.volume_mw),
            ("pricePerMWh", self.price_per_mwh),
            ("transmissionTariff", self.transmission_tariff),
            ("distributionTariff", self.distribution_tariff),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(RequestError::InvalidAmount { field, value });
            }
        }
        if !(MIN_HOURS..=MAX_HOURS).contains(&self.hours_count) {
            return Err(RequestError::HoursOutOfRange {
                min: MIN_HOURS,
                max: MAX_HOURS,
                value: self.hours_count,
            });
        }

        let total_volume = self.volume_mw * f64::from(self.hours_count);
        let products = [
            ("pricePerMWh", total_volume * self.price_per_mwh),
            ("transmissionTariff", total_volume * self.transmission_tariff),
            ("distributionTariff", total_volume * self.distribution_tariff),
        ];
        for (field, value) in products {
            if !value.is_finite() || value > MAX_AMOUNT {
                return Err(RequestError::AmountTooLarge {
                    field,
                    value,
                    max: MAX_AMOUNT,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// FeeBreakdown
// ============================================================================

/// Full-precision result of a fee calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    /// MWh.
    pub total_volume: f64,
    pub base_amount: f64,
    pub commission: f64,
    pub commission_rate_percent: f64,
    /// Collateral held by the exchange; not part of `total_amount`.
    pub guarantee_deposit: f64,
    pub guarantee_rate_percent: f64,
    pub transmission_cost: f64,
    pub distribution_cost: f64,
    pub vat_amount: f64,
    #[serde(rename = "specialVATAmount")]
    pub special_vat_amount: f64,
    pub total_amount: f64,
    #[serde(rename = "pricePerMWhEffective")]
    pub price_per_mwh_effective: f64,
}

impl FeeBreakdown {
    /// Display view with money rounded to kopecks.
    pub fn rounded(&self) -> RoundedFeeBreakdown {
        RoundedFeeBreakdown {
            total_volume: round_money(self.total_volume),
            base_amount: round_money(self.base_amount),
            commission: round_money(self.commission),
            commission_rate_percent: self.commission_rate_percent,
            guarantee_deposit: round_money(self.guarantee_deposit),
            guarantee_rate_percent: self.guarantee_rate_percent,
            transmission_cost: round_money(self.transmission_cost),
            distribution_cost: round_money(self.distribution_cost),
            vat_amount: round_money(self.vat_amount),
            special_vat_amount: round_money(self.special_vat_amount),
            total_amount: round_money(self.total_amount),
            price_per_mwh_effective: round_money(self.price_per_mwh_effective),
        }
    }
}

/// [`FeeBreakdown`] rounded to two decimals, serialized as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedFeeBreakdown {
    pub total_volume: Decimal,
    pub base_amount: Decimal,
    pub commission: Decimal,
    pub commission_rate_percent: f64,
    pub guarantee_deposit: Decimal,
    pub guarantee_rate_percent: f64,
    pub transmission_cost: Decimal,
    pub distribution_cost: Decimal,
    pub vat_amount: Decimal,
    #[serde(rename = "specialVATAmount")]
    pub special_vat_amount: Decimal,
    pub total_amount: Decimal,
    #[serde(rename = "pricePerMWhEffective")]
    pub price_per_mwh_effective: Decimal,
}

/// Rounds the shortest decimal form of `value`, so `1.005` becomes `1.01`.
fn round_money(value: f64) -> Decimal {
    value
        .to_string()
        .parse::<Decimal>()
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
