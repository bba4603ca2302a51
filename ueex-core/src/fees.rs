//! Exchange fee calculator.
//!
//! Turns a [`FeeRequest`] into a [`FeeBreakdown`]: commission, guarantee
//! deposit, network tariffs, VAT and special VAT, and the settlement total.
//! The computation is pure and never fails; degenerate volumes yield a zero
//! effective price instead of a division fault.

use crate::models::enums::TradeDirection;
use crate::models::fees::{FeeBreakdown, FeeRequest};
use crate::reference::{SPECIAL_VAT_RATE, VAT_RATE};

/// Compute the full fee breakdown for one trade.
///
/// Sellers see commission and taxes deducted from their proceeds. Buyers see
/// every cost added on top, including network tariffs. Tariffs are forced to
/// zero for sellers whatever the `include_*` flags say. The guarantee deposit
/// is informational and never enters `total_amount`.
pub fn compute_fees(request: &FeeRequest) -> FeeBreakdown {
    let total_volume = request.volume_mw * f64::from(request.hours_count);
    let base_amount = total_volume * request.price_per_mwh;

    let rates = request.auction_type.rates();
    let commission_rate_percent = rates.commission_percent;
    let commission = base_amount * commission_rate_percent / 100.0;

    let guarantee_rate_percent = rates.guarantee_percent(request.trade_direction);
    let guarantee_deposit = base_amount * guarantee_rate_percent / 100.0;

    let is_buy = request.trade_direction == TradeDirection::Buy;
    let transmission_cost = if is_buy && request.include_transmission {
        total_volume * request.transmission_tariff
    } else {
        0.0
    };
    let distribution_cost = if is_buy && request.include_distribution {
        total_volume * request.distribution_tariff
    } else {
        0.0
    };

    let vat_base = base_amount + commission + transmission_cost + distribution_cost;
    let vat_amount = if request.include_vat {
        vat_base * VAT_RATE
    } else {
        0.0
    };
    let special_vat_amount = if request.include_special_vat {
        base_amount * SPECIAL_VAT_RATE
    } else {
        0.0
    };

    let total_amount = match request.trade_direction {
        TradeDirection::Sell => base_amount - commission - vat_amount - special_vat_amount,
        TradeDirection::Buy => {
            base_amount
                + commission
                + transmission_cost
                + distribution_cost
                + vat_amount
                + special_vat_amount
        }
    };

    let price_per_mwh_effective = if total_volume > 0.0 {
        total_amount / total_volume
    } else {
        0.0
    };

    tracing::trace!(
        auction = %request.auction_type,
        direction = %request.trade_direction,
        total_volume,
        total_amount,
        "fees computed"
    );

    FeeBreakdown {
        total_volume,
        base_amount,
        commission,
        commission_rate_percent,
        guarantee_deposit,
        guarantee_rate_percent,
        transmission_cost,
        distribution_cost,
        vat_amount,
        special_vat_amount,
        total_amount,
        price_per_mwh_effective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::AuctionType;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-6 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn bare(direction: TradeDirection) -> FeeRequest {
        FeeRequest {
            trade_direction: direction,
            include_vat: false,
            include_special_vat: false,
            ..Default::default()
        }
    }

    #[test]
    fn sell_without_taxes_only_deducts_commission() {
        let mut req = bare(TradeDirection::Sell);
        req.include_transmission = true;
        req.include_distribution = true;

        let b = compute_fees(&req);
        assert_eq!(b.transmission_cost, 0.0);
        assert_eq!(b.distribution_cost, 0.0);
        assert_close(b.total_amount, b.base_amount - b.commission);
    }

    #[test]
    fn sell_with_vat_reference_figures() {
        let req = FeeRequest {
            volume_mw: 100.0,
            hours_count: 24,
            price_per_mwh: 3500.0,
            auction_type: AuctionType::Specialized,
            trade_direction: TradeDirection::Sell,
            include_vat: true,
            include_special_vat: false,
            ..Default::default()
        };
        let b = compute_fees(&req);
        assert_close(b.total_volume, 2400.0);
        assert_close(b.base_amount, 8_400_000.0);
        assert_close(b.commission, 42_000.0);
        assert_eq!(b.commission_rate_percent, 0.5);
        assert_close(b.guarantee_deposit, 840_000.0);
        assert_eq!(b.guarantee_rate_percent, 10.0);
        // VAT base adds the commission for both directions.
        assert_close(b.vat_amount, 1_688_400.0);
        assert_close(b.total_amount, 6_669_600.0);
        assert_close(b.price_per_mwh_effective, 6_669_600.0 / 2400.0);
    }

    #[test]
    fn buy_adds_every_cost() {
        let req = FeeRequest {
            volume_mw: 10.0,
            hours_count: 10,
            price_per_mwh: 4000.0,
            auction_type: AuctionType::Commercial,
            trade_direction: TradeDirection::Buy,
            include_vat: true,
            include_special_vat: true,
            transmission_tariff: 300.0,
            include_transmission: true,
            distribution_tariff: 700.0,
            include_distribution: true,
        };
        let b = compute_fees(&req);
        assert_close(b.base_amount, 400_000.0);
        assert_close(b.commission, 1_200.0);
        assert_close(b.transmission_cost, 30_000.0);
        assert_close(b.distribution_cost, 70_000.0);
        assert_close(b.vat_amount, 0.2 * 501_200.0);
        assert_close(b.special_vat_amount, 28_000.0);
        assert_close(b.total_amount, 501_200.0 + 100_240.0 + 28_000.0);
        assert_eq!(b.guarantee_rate_percent, 12.0);
        assert_close(b.guarantee_deposit, 48_000.0);
    }

    #[test]
    fn guarantee_deposit_is_not_part_of_total() {
        let mut req = bare(TradeDirection::Buy);
        req.auction_type = AuctionType::ExportImport;
        let b = compute_fees(&req);
        assert!(b.guarantee_deposit > 0.0);
        assert_close(b.total_amount, b.base_amount + b.commission);
    }

    #[test]
    fn buy_total_grows_with_each_tariff() {
        let mut req = bare(TradeDirection::Buy);
        req.include_transmission = true;
        req.include_distribution = true;
        req.transmission_tariff = 0.0;
        req.distribution_tariff = 0.0;

        let mut previous = compute_fees(&req).total_amount;
        for step in 1..=5 {
            req.transmission_tariff = 100.0 * f64::from(step);
            let total = compute_fees(&req).total_amount;
            assert!(total > previous);
            previous = total;
        }
        for step in 1..=5 {
            req.distribution_tariff = 150.0 * f64::from(step);
            let total = compute_fees(&req).total_amount;
            assert!(total > previous);
            previous = total;
        }
    }

    #[test]
    fn flags_off_ignore_tariffs_for_buyers() {
        let mut req = bare(TradeDirection::Buy);
        req.transmission_tariff = 999.0;
        req.distribution_tariff = 999.0;
        let b = compute_fees(&req);
        assert_eq!(b.transmission_cost, 0.0);
        assert_eq!(b.distribution_cost, 0.0);
    }

    #[test]
    fn both_taxes_stack_on_sell() {
        let mut req = bare(TradeDirection::Sell);
        req.include_vat = true;
        req.include_special_vat = true;
        let b = compute_fees(&req);
        assert_close(b.special_vat_amount, b.base_amount * 0.07);
        assert_close(
            b.total_amount,
            b.base_amount - b.commission - b.vat_amount - b.special_vat_amount,
        );
    }

    #[test]
    fn effective_price_matches_total_over_volume() {
        let b = compute_fees(&FeeRequest::default());
        assert_close(b.price_per_mwh_effective, b.total_amount / b.total_volume);
    }

    #[test]
    fn zero_volume_yields_zero_effective_price() {
        let req = FeeRequest {
            volume_mw: 0.0,
            ..Default::default()
        };
        let b = compute_fees(&req);
        assert_eq!(b.total_volume, 0.0);
        assert_eq!(b.total_amount, 0.0);
        assert_eq!(b.price_per_mwh_effective, 0.0);
        assert!(!b.price_per_mwh_effective.is_nan());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let req = FeeRequest::default();
        assert_eq!(compute_fees(&req), compute_fees(&req));
    }
}
