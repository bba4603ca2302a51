//! UEEX Calculator API payloads.
//!
//! Response bodies wrap the `ueex-core` results; all JSON keys are camelCase
//! to match the calculator front end.

use serde::{Deserialize, Serialize};

use ueex_core::models::enums::{AuctionType, MarketRole, PricePeriod, ProcessType};
use ueex_core::reference::{self, AuctionRates, Domain};
use ueex_core::{FeeBreakdown, RoundedFeeBreakdown};

// ============================================================================
// Calculator
// ============================================================================

/// Fee calculation result: exact figures plus the display view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeResponse {
    pub breakdown: FeeBreakdown,
    pub rounded: RoundedFeeBreakdown,
}

impl From<FeeBreakdown> for FeeResponse {
    fn from(breakdown: FeeBreakdown) -> Self {
        Self {
            rounded: breakdown.rounded(),
            breakdown,
        }
    }
}

// ============================================================================
// Schedule documents
// ============================================================================

/// Generated schedule document, ready for clipboard copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub document_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub xml: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentIdResponse {
    pub document_id: String,
}

// ============================================================================
// Reference data
// ============================================================================

/// A code with its Ukrainian label, for select boxes.
#[derive(Debug, Clone, Serialize)]
pub struct CodeLabel {
    pub code: &'static str,
    pub name: &'static str,
}

/// Everything the forms need to populate their selectors and defaults.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub auction_types: &'static [AuctionRates],
    pub default_auction_type: AuctionType,
    pub vat_percent: f64,
    #[serde(rename = "specialVATPercent")]
    pub special_vat_percent: f64,
    pub default_transmission_tariff: f64,
    pub default_distribution_tariff: f64,
    pub domains: &'static [Domain],
    pub process_types: Vec<CodeLabel>,
    pub sender_roles: Vec<CodeLabel>,
    pub receiver_roles: Vec<CodeLabel>,
    #[serde(rename = "defaultReceiverEIC")]
    pub default_receiver_eic: &'static str,
}

fn role_labels(roles: &[MarketRole]) -> Vec<CodeLabel> {
    roles
        .iter()
        .map(|r| CodeLabel {
            code: r.code(),
            name: r.display_name(),
        })
        .collect()
}

impl ReferenceData {
    pub fn current() -> Self {
        Self {
            auction_types: &reference::AUCTION_RATES,
            default_auction_type: AuctionType::default(),
            vat_percent: reference::VAT_PERCENT,
            special_vat_percent: reference::SPECIAL_VAT_PERCENT,
            default_transmission_tariff: reference::DEFAULT_TRANSMISSION_TARIFF,
            default_distribution_tariff: reference::DEFAULT_DISTRIBUTION_TARIFF,
            domains: &reference::DOMAINS,
            process_types: ProcessType::ALL
                .iter()
                .map(|p| CodeLabel {
                    code: p.code(),
                    name: p.display_name(),
                })
                .collect(),
            sender_roles: role_labels(&MarketRole::SENDER_ROLES),
            receiver_roles: role_labels(&MarketRole::RECEIVER_ROLES),
            default_receiver_eic: reference::DEFAULT_RECEIVER_EIC,
        }
    }
}

// ============================================================================
// Price history
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub period: Option<String>,
}

impl PriceQuery {
    pub fn period(&self) -> PricePeriod {
        self.period
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }
}

// ============================================================================
// API Response Wrappers
// ============================================================================

/// Generic JSON API response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u16>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error_code: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>, code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error_code: Some(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_query_defaults_to_month() {
        assert_eq!(PriceQuery { period: None }.period(), PricePeriod::Month);
        assert_eq!(
            PriceQuery { period: Some("bogus".into()) }.period(),
            PricePeriod::Month
        );
        assert_eq!(
            PriceQuery { period: Some("week".into()) }.period(),
            PricePeriod::Week
        );
    }

    #[test]
    fn reference_data_lists_roles_and_rates() {
        let data = ReferenceData::current();
        assert_eq!(data.auction_types.len(), 4);
        assert_eq!(data.sender_roles.len(), 4);
        assert_eq!(data.receiver_roles[0].code, "A04");
        assert_eq!(data.vat_percent, 20.0);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["auctionTypes"][3]["auctionType"], "export_import");
        assert_eq!(json["auctionTypes"][0]["commissionPercent"], 0.5);
        assert_eq!(json["defaultReceiverEIC"], "10X1001A1001A450");
    }

    #[test]
    fn error_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::error("bad", 400)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errorCode"], 400);
        assert!(json.get("data").is_none());
    }
}
