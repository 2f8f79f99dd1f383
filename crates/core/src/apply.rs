// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Price state transitions.
//!
//! Exactly four ways a quote's price state changes: first link, apply,
//! manual override, and reset to calculated. Each takes the current state
//! immutably and returns a new state paired with the audit event recording
//! the transition.

use crate::error::CoreError;
use crate::state::{QuotePriceState, TransitionResult};
use crate::sync::{Recalculation, recalculate};
use trip_quote_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use trip_quote_domain::{PriceBreakdown, SuperPackage, TripParams, resolve};

/// Creates the initial price state when a quote is first linked to a
/// package.
///
/// Resolves the price fresh against the package's current version. A quote
/// cannot be linked when resolution fails; an on-request cell must be
/// quoted manually after linking is retried with different parameters, or
/// handled outside the automatic path.
///
/// # Errors
///
/// Returns `CoreError::ResolutionFailed` when the resolver cannot produce a
/// price for the given parameters.
pub fn link_to_package(
    quote_id: i64,
    package: &SuperPackage,
    params: TripParams,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let breakdown: PriceBreakdown = resolve(package, &params)?;
    let new_state: QuotePriceState = QuotePriceState::first_link(package, params, breakdown);

    let action: Action = Action::new(
        String::from("LinkToPackage"),
        Some(format!(
            "Linked quote to package '{}' v{} at {:.2} {}",
            package.name,
            package.version,
            new_state.total_price,
            package.currency.as_str()
        )),
    );

    let before: StateSnapshot = StateSnapshot::new(String::from("unpriced"));
    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, quote_id);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Applies a recalculated price to a quote.
///
/// The only mutator of `total_price` outside of direct manual entry. Sets
/// the price and breakdown, links the package's current version, records
/// the parameters, and clears any manual override.
///
/// # Arguments
///
/// * `quote` - The current price state (immutable)
/// * `quote_id` - The quote being updated, for audit scoping
/// * `package` - The package version being applied against
/// * `params` - The parameters the breakdown was computed from
/// * `breakdown` - The freshly resolved breakdown to persist
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
#[must_use]
pub fn apply_price(
    quote: &QuotePriceState,
    quote_id: i64,
    package: &SuperPackage,
    params: TripParams,
    breakdown: PriceBreakdown,
    actor: Actor,
    cause: Cause,
) -> TransitionResult {
    let before: StateSnapshot = quote.to_snapshot();

    let new_state: QuotePriceState = QuotePriceState {
        total_price: breakdown.total_price,
        currency: package.currency,
        is_manual_override: false,
        linked_package_id: package.package_id,
        linked_package_version: package.version,
        last_breakdown: Some(breakdown),
        last_computed_params: Some(params),
    };

    let action: Action = Action::new(
        String::from("ApplyPrice"),
        Some(format!(
            "Applied {:.2} {} against package '{}' v{}",
            new_state.total_price,
            package.currency.as_str(),
            package.name,
            package.version
        )),
    );

    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, quote_id);

    TransitionResult {
        new_state,
        audit_event,
    }
}

/// Sets a manual price on a quote.
///
/// Leaves `linked_package_version` and `last_computed_params` untouched so
/// a later reset can recompute against the original reference point, or a
/// fresh recalculation can run against current data.
#[must_use]
pub fn set_manual_price(
    quote: &QuotePriceState,
    quote_id: i64,
    price: f64,
    actor: Actor,
    cause: Cause,
) -> TransitionResult {
    let before: StateSnapshot = quote.to_snapshot();

    let mut new_state: QuotePriceState = quote.clone();
    new_state.total_price = price;
    new_state.is_manual_override = true;

    let action: Action = Action::new(
        String::from("SetManualPrice"),
        Some(format!(
            "Manual price {:.2} {} entered",
            price,
            quote.currency.as_str()
        )),
    );

    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, quote_id);

    TransitionResult {
        new_state,
        audit_event,
    }
}

/// Resets a quote to its calculated price.
///
/// Equivalent to a recalculation followed immediately by an apply; clears
/// the manual override. The only path by which a manual price is replaced
/// automatically.
///
/// # Errors
///
/// Returns `CoreError::ResolutionFailed` when the resolver cannot produce a
/// price; the quote is left untouched in that case.
pub fn reset_to_calculated(
    quote: &QuotePriceState,
    quote_id: i64,
    package: &SuperPackage,
    params: TripParams,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let recalc: Recalculation = recalculate(quote, package, &params)?;
    let before: StateSnapshot = quote.to_snapshot();

    let new_state: QuotePriceState = QuotePriceState {
        total_price: recalc.breakdown.total_price,
        currency: package.currency,
        is_manual_override: false,
        linked_package_id: package.package_id,
        linked_package_version: package.version,
        last_breakdown: Some(recalc.breakdown),
        last_computed_params: Some(params),
    };

    let action: Action = Action::new(
        String::from("ResetToCalculated"),
        Some(format!(
            "Reset to calculated price {:.2} {} (was {:.2}, manual={})",
            new_state.total_price,
            package.currency.as_str(),
            quote.total_price,
            quote.is_manual_override
        )),
    );

    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, quote_id);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::sync::{SyncStatus, evaluate};
    use time::{Date, Month};
    use trip_quote_domain::{
        Currency, GroupSizeTier, PriceCell, PricePoint, PricingPeriod, ResolutionError,
    };

    fn august(day: u8) -> Date {
        Date::from_calendar_date(2026, Month::August, day).unwrap()
    }

    fn package() -> SuperPackage {
        SuperPackage::new(
            1,
            String::from("Algarve Golf Week"),
            Currency::GBP,
            vec![
                GroupSizeTier::new(String::from("Small"), 1, 4),
                GroupSizeTier::new(String::from("Large"), 5, 10),
            ],
            vec![3, 7],
            vec![PricingPeriod::month(
                String::from("August"),
                vec![
                    PricePoint::new(0, 3, PriceCell::Numeric(500.0)),
                    PricePoint::new(0, 7, PriceCell::Numeric(900.0)),
                    PricePoint::new(1, 3, PriceCell::Numeric(850.0)),
                    PricePoint::new(1, 7, PriceCell::Numeric(1500.0)),
                ],
            )],
        )
    }

    fn test_actor() -> Actor {
        Actor::new(String::from("admin-123"), String::from("admin"))
    }

    fn test_cause() -> Cause {
        Cause::new(String::from("req-1"), String::from("Test request"))
    }

    fn linked_quote(pkg: &SuperPackage, params: TripParams) -> QuotePriceState {
        link_to_package(7, pkg, params, test_actor(), test_cause())
            .unwrap()
            .new_state
    }

    #[test]
    fn test_link_produces_priced_state_and_audit_event() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 7, august(10));

        let result: TransitionResult =
            link_to_package(7, &pkg, params, test_actor(), test_cause()).unwrap();

        assert!((result.new_state.total_price - 2700.0).abs() < f64::EPSILON);
        assert_eq!(result.audit_event.action.name, "LinkToPackage");
        assert_eq!(result.audit_event.quote_id, 7);
        assert_eq!(result.audit_event.before.data, "unpriced");
    }

    #[test]
    fn test_link_fails_closed_when_unresolvable() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 5, august(10));

        let error: CoreError =
            link_to_package(7, &pkg, params, test_actor(), test_cause()).unwrap_err();

        assert!(matches!(
            error,
            CoreError::ResolutionFailed(ResolutionError::UnsupportedDuration { .. })
        ));
    }

    #[test]
    fn test_apply_round_trip_reports_synced() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 7, august(10));
        let quote: QuotePriceState = linked_quote(&pkg, params);

        // Drift the parameters, recalculate, apply: back in sync.
        let new_params: TripParams = TripParams::new(6, 7, august(10));
        let recalc: Recalculation = recalculate(&quote, &pkg, &new_params).unwrap();

        let result: TransitionResult = apply_price(
            &quote,
            7,
            &pkg,
            new_params,
            recalc.breakdown,
            test_actor(),
            test_cause(),
        );

        assert_eq!(
            evaluate(&result.new_state, &pkg, &new_params),
            SyncStatus::Synced
        );
        assert!((result.new_state.total_price - 9000.0).abs() < f64::EPSILON);
        assert!(!result.new_state.is_manual_override);
    }

    #[test]
    fn test_apply_clears_manual_override() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 7, august(10));
        let quote: QuotePriceState = linked_quote(&pkg, params);

        let manual: QuotePriceState =
            set_manual_price(&quote, 7, 1999.0, test_actor(), test_cause()).new_state;
        assert!(manual.is_manual_override);

        let recalc: Recalculation = recalculate(&manual, &pkg, &params).unwrap();
        let applied: QuotePriceState = apply_price(
            &manual,
            7,
            &pkg,
            params,
            recalc.breakdown,
            test_actor(),
            test_cause(),
        )
        .new_state;

        assert!(!applied.is_manual_override);
        assert!((applied.total_price - 2700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_manual_price_preserves_reference_point() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 7, august(10));
        let quote: QuotePriceState = linked_quote(&pkg, params);

        let result: TransitionResult =
            set_manual_price(&quote, 7, 2500.0, test_actor(), test_cause());

        assert!(result.new_state.is_manual_override);
        assert!((result.new_state.total_price - 2500.0).abs() < f64::EPSILON);
        // Reference point untouched for a later reset.
        assert_eq!(
            result.new_state.linked_package_version,
            quote.linked_package_version
        );
        assert_eq!(
            result.new_state.last_computed_params,
            quote.last_computed_params
        );
        assert_eq!(result.audit_event.action.name, "SetManualPrice");
    }

    #[test]
    fn test_reset_clears_manual_and_recomputes() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 7, august(10));
        let quote: QuotePriceState = linked_quote(&pkg, params);
        let manual: QuotePriceState =
            set_manual_price(&quote, 7, 100.0, test_actor(), test_cause()).new_state;

        let result: TransitionResult =
            reset_to_calculated(&manual, 7, &pkg, params, test_actor(), test_cause()).unwrap();

        assert!(!result.new_state.is_manual_override);
        assert!((result.new_state.total_price - 2700.0).abs() < f64::EPSILON);
        assert_eq!(evaluate(&result.new_state, &pkg, &params), SyncStatus::Synced);
        assert_eq!(result.audit_event.action.name, "ResetToCalculated");
    }

    #[test]
    fn test_reset_leaves_quote_untouched_on_failure() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 7, august(10));
        let quote: QuotePriceState = linked_quote(&pkg, params);
        let manual: QuotePriceState =
            set_manual_price(&quote, 7, 100.0, test_actor(), test_cause()).new_state;

        let unsupported: TripParams = TripParams::new(3, 5, august(10));
        let result = reset_to_calculated(&manual, 7, &pkg, unsupported, test_actor(), test_cause());

        assert!(result.is_err());
        assert!(manual.is_manual_override);
        assert!((manual.total_price - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_records_current_package_version() {
        let pkg: SuperPackage = package();
        let params: TripParams = TripParams::new(3, 7, august(10));
        let quote: QuotePriceState = linked_quote(&pkg, params);

        let revised: SuperPackage = pkg.with_revised_pricing(
            pkg.group_size_tiers.clone(),
            pkg.duration_options.clone(),
            pkg.pricing_matrix.clone(),
        );
        let recalc: Recalculation = recalculate(&quote, &revised, &params).unwrap();

        let applied: QuotePriceState = apply_price(
            &quote,
            7,
            &revised,
            params,
            recalc.breakdown,
            test_actor(),
            test_cause(),
        )
        .new_state;

        assert_eq!(applied.linked_package_version, 2);
    }
}
