// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use trip_quote_audit::{AuditEvent, StateSnapshot};
use trip_quote_domain::{Currency, PriceBreakdown, SuperPackage, TripParams};

/// The persisted price state of a single quote.
///
/// Created when a quote is first linked to a package; mutated only through
/// the transition functions in this crate; never deleted while the quote
/// exists. It is the authoritative record of "why this price is what it is".
///
/// Invariant: while `is_manual_override` is true, no transition other than
/// an explicit manual entry or `reset_to_calculated` may change
/// `total_price`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePriceState {
    /// The quote's current total price.
    pub total_price: f64,
    /// The currency inherited from the linked package.
    pub currency: Currency,
    /// Whether the price was entered by hand, decoupling the quote from
    /// automatic recalculation.
    pub is_manual_override: bool,
    /// The package this quote is linked to.
    pub linked_package_id: i64,
    /// The package version the price was last computed against.
    pub linked_package_version: u32,
    /// The breakdown of the last applied computation, if any.
    pub last_breakdown: Option<PriceBreakdown>,
    /// The trip parameters the price was last computed from, if any.
    pub last_computed_params: Option<TripParams>,
}

impl QuotePriceState {
    /// Creates the initial price state when a quote is first linked to a
    /// package, from a freshly resolved breakdown.
    ///
    /// # Arguments
    ///
    /// * `package` - The package the quote links to, at its current version
    /// * `params` - The trip parameters the breakdown was computed from
    /// * `breakdown` - The resolved price breakdown
    #[must_use]
    pub const fn first_link(
        package: &SuperPackage,
        params: TripParams,
        breakdown: PriceBreakdown,
    ) -> Self {
        Self {
            total_price: breakdown.total_price,
            currency: package.currency,
            is_manual_override: false,
            linked_package_id: package.package_id,
            linked_package_version: package.version,
            last_breakdown: Some(breakdown),
            last_computed_params: Some(params),
        }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "total_price={:.2},currency={},manual={},package={}@v{}",
            self.total_price,
            self.currency.as_str(),
            self.is_manual_override,
            self.linked_package_id,
            self.linked_package_version
        ))
    }
}

/// The result of a successful price transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The caller persists `new_state` and `audit_event` together.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new price state after the transition.
    pub new_state: QuotePriceState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use trip_quote_domain::{Currency, GroupSizeTier, PriceCell, PricePoint, PricingPeriod};

    fn package() -> SuperPackage {
        SuperPackage::new(
            9,
            String::from("Alpine Escape"),
            Currency::EUR,
            vec![GroupSizeTier::new(String::from("Small"), 1, 4)],
            vec![7],
            vec![PricingPeriod::month(
                String::from("August"),
                vec![PricePoint::new(0, 7, PriceCell::Numeric(900.0))],
            )],
        )
    }

    fn breakdown() -> PriceBreakdown {
        PriceBreakdown {
            price_per_person: 900.0,
            tier_used: String::from("Small"),
            tier_index: 0,
            period_used: String::from("August"),
            number_of_people: 3,
            total_price: 2700.0,
        }
    }

    #[test]
    fn test_first_link_records_package_and_params() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(
            3,
            7,
            time::Date::from_calendar_date(2026, time::Month::August, 10).unwrap(),
        );

        let state: QuotePriceState = QuotePriceState::first_link(&pkg, params, breakdown());

        assert!((state.total_price - 2700.0).abs() < f64::EPSILON);
        assert_eq!(state.currency, Currency::EUR);
        assert!(!state.is_manual_override);
        assert_eq!(state.linked_package_id, 9);
        assert_eq!(state.linked_package_version, 1);
        assert_eq!(state.last_computed_params, Some(params));
    }

    #[test]
    fn test_snapshot_includes_pricing_fields() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(
            3,
            7,
            time::Date::from_calendar_date(2026, time::Month::August, 10).unwrap(),
        );
        let state: QuotePriceState = QuotePriceState::first_link(&pkg, params, breakdown());

        let snapshot: StateSnapshot = state.to_snapshot();

        assert_eq!(
            snapshot.data,
            "total_price=2700.00,currency=EUR,manual=false,package=9@v1"
        );
    }
}
