// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for package authoring and quote price operations.
//!
//! Handlers translate wire DTOs into domain types, run the core transition
//! or calculation, persist through the repository traits, and translate any
//! failure into the API error taxonomy. Domain and core errors never leak
//! through this boundary untranslated.

use std::str::FromStr;

use trip_quote::{
    PriceComparison, QuotePriceState, Recalculation, SyncStatus, TransitionResult, evaluate,
    recalculate,
};
use trip_quote_audit::{Actor, AuditEvent, Cause};
use trip_quote_domain::{
    CompletenessReport, Currency, PriceBreakdown, SuperPackage, TripParams, validate_completeness,
    validate_package,
};

use crate::currency::format_price;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_resolution_error,
};
use crate::repository::{PackageRepository, QuoteRepository, StoredQuote};
use crate::request_response::{
    ApplyPriceRequest, ApplyPriceResponse, CreatePackageRequest, CreatePackageResponse,
    CreateQuoteRequest, CreateQuoteResponse, GetPackageCompletenessResponse, GetSyncStatusResponse,
    MissingCellInfo, PackageInfo, PriceBreakdownInfo, PriceComparisonInfo, QuoteSummary,
    RecalculatePriceResponse, ResetPriceResponse, SetManualPriceRequest, SetManualPriceResponse,
    TripParamsInfo, UpdatePackagePricingRequest, UpdatePackagePricingResponse,
    UpdateTripParamsRequest, UpdateTripParamsResponse,
};

/// Tolerance for cross-checking a submitted price against its calculation.
const PRICE_MATCH_TOLERANCE: f64 = 0.005;

/// The result of an API operation that includes both the response and the audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
    /// The new price state after the operation.
    pub new_state: QuotePriceState,
}

fn breakdown_info(breakdown: &PriceBreakdown, currency: Currency) -> PriceBreakdownInfo {
    PriceBreakdownInfo {
        price_per_person: breakdown.price_per_person,
        tier_used: breakdown.tier_used.clone(),
        tier_index: breakdown.tier_index,
        period_used: breakdown.period_used.clone(),
        number_of_people: breakdown.number_of_people,
        total_price: breakdown.total_price,
        formatted_total: format_price(breakdown.total_price, currency),
    }
}

fn comparison_info(comparison: &PriceComparison) -> PriceComparisonInfo {
    PriceComparisonInfo {
        old_price: comparison.old_price,
        new_price: comparison.new_price,
        price_difference: comparison.price_difference,
        percentage_change: comparison.percentage_change,
        formatted_old_price: format_price(comparison.old_price, comparison.currency),
        formatted_new_price: format_price(comparison.new_price, comparison.currency),
        formatted_difference: format_price(comparison.price_difference, comparison.currency),
    }
}

fn package_info(package: &SuperPackage, linked_version: u32) -> PackageInfo {
    PackageInfo {
        package_id: package.package_id,
        package_name: package.name.clone(),
        current_version: package.version,
        linked_version,
        version_changed: package.version != linked_version,
    }
}

const fn trip_params_info(params: TripParams) -> TripParamsInfo {
    TripParamsInfo {
        number_of_people: params.number_of_people,
        number_of_nights: params.number_of_nights,
        arrival_date: params.arrival_date,
    }
}

fn quote_summary(quote_id: i64, state: &QuotePriceState, status: &SyncStatus) -> QuoteSummary {
    QuoteSummary {
        quote_id,
        total_price: state.total_price,
        formatted_price: format_price(state.total_price, state.currency),
        currency: state.currency.as_str().to_string(),
        is_manual_override: state.is_manual_override,
        linked_package_id: state.linked_package_id,
        linked_package_version: state.linked_package_version,
        sync_status: status.as_str().to_string(),
    }
}

fn missing_cell_infos(report: &CompletenessReport) -> Vec<MissingCellInfo> {
    report
        .missing_cells
        .iter()
        .map(|cell| MissingCellInfo {
            period: cell.period.clone(),
            tier: cell.tier.clone(),
            nights: cell.nights,
        })
        .collect()
}

fn validate_price_field(value: f64, field: &str) -> Result<(), ApiError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Price must be a positive finite number, got {value}"),
        });
    }
    Ok(())
}

fn validate_trip_fields(number_of_people: u32, number_of_nights: u32) -> Result<(), ApiError> {
    if number_of_people == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("number_of_people"),
            message: String::from("Party size must be at least 1"),
        });
    }
    if number_of_nights == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("number_of_nights"),
            message: String::from("Stay length must be at least 1 night"),
        });
    }
    Ok(())
}

/// Creates a new pricing package at version 1.
///
/// The package is structurally validated before it is stored; an incomplete
/// matrix is accepted (authoring may be in progress) and flagged in the
/// response.
///
/// # Errors
///
/// Returns an error if the currency code is unknown, a structural check
/// fails, or the store cannot persist the package.
pub fn create_package<R: PackageRepository>(
    repo: &mut R,
    request: CreatePackageRequest,
) -> Result<CreatePackageResponse, ApiError> {
    let currency: Currency = Currency::from_str(&request.currency).map_err(translate_domain_error)?;

    let package_id: i64 = repo.next_package_id()?;
    let package: SuperPackage = SuperPackage::new(
        package_id,
        request.name,
        currency,
        request.group_size_tiers,
        request.duration_options,
        request.pricing_matrix,
    );

    validate_package(&package).map_err(translate_domain_error)?;

    let report: CompletenessReport = validate_completeness(
        &package.group_size_tiers,
        &package.duration_options,
        &package.pricing_matrix,
    );

    repo.save_package(&package)?;
    tracing::info!(package_id, name = %package.name, "created package");

    Ok(CreatePackageResponse {
        package_id,
        name: package.name,
        version: package.version,
        is_complete: report.is_valid,
        message: format!("Created package {package_id} at version 1"),
    })
}

/// Revises a package's pricing data, bumping its version.
///
/// Linked quotes are not touched; their stored prices become out of sync
/// against the new version and surface as such on the next status read.
///
/// # Errors
///
/// Returns an error if the package does not exist, a structural check
/// fails, or the store cannot persist the revision.
pub fn update_package_pricing<R: PackageRepository>(
    repo: &mut R,
    package_id: i64,
    request: UpdatePackagePricingRequest,
) -> Result<UpdatePackagePricingResponse, ApiError> {
    let current: SuperPackage = repo.load_package(package_id)?;
    let revised: SuperPackage = current.with_revised_pricing(
        request.group_size_tiers,
        request.duration_options,
        request.pricing_matrix,
    );

    validate_package(&revised).map_err(translate_domain_error)?;

    let report: CompletenessReport = validate_completeness(
        &revised.group_size_tiers,
        &revised.duration_options,
        &revised.pricing_matrix,
    );

    repo.save_package(&revised)?;
    tracing::info!(package_id, version = revised.version, "revised package pricing");

    Ok(UpdatePackagePricingResponse {
        package_id,
        version: revised.version,
        is_complete: report.is_valid,
        missing_cell_count: report.missing_cells.len(),
        message: format!("Package {package_id} is now at version {}", revised.version),
    })
}

/// Reads a package's matrix completeness report.
///
/// # Errors
///
/// Returns an error if the package does not exist.
pub fn get_package_completeness<R: PackageRepository>(
    repo: &R,
    package_id: i64,
) -> Result<GetPackageCompletenessResponse, ApiError> {
    let package: SuperPackage = repo.load_package(package_id)?;
    let report: CompletenessReport = validate_completeness(
        &package.group_size_tiers,
        &package.duration_options,
        &package.pricing_matrix,
    );

    Ok(GetPackageCompletenessResponse {
        package_id,
        version: package.version,
        is_valid: report.is_valid,
        expected_cells: report.expected_cells,
        missing_cells: missing_cell_infos(&report),
    })
}

/// Creates a quote linked to a package, computing and applying its initial
/// price in the same step.
///
/// # Errors
///
/// Returns an error if the package does not exist, the parameters are
/// invalid, or the resolver cannot produce a price for them. A quote is
/// never created without a price.
pub fn create_quote<R: PackageRepository + QuoteRepository>(
    repo: &mut R,
    request: CreateQuoteRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<CreateQuoteResponse>, ApiError> {
    validate_trip_fields(request.number_of_people, request.number_of_nights)?;

    let package: SuperPackage = repo.load_package(request.package_id)?;
    let params: TripParams = TripParams::new(
        request.number_of_people,
        request.number_of_nights,
        request.arrival_date,
    );

    let quote_id: i64 = repo.next_quote_id()?;
    let transition: TransitionResult =
        trip_quote::link_to_package(quote_id, &package, params, actor, cause)
            .map_err(translate_core_error)?;

    let stored: StoredQuote = StoredQuote {
        quote_id,
        trip_params: params,
        pricing: transition.new_state.clone(),
    };
    repo.save_quote(&stored)?;
    repo.record_audit_event(&transition.audit_event)?;
    tracing::info!(quote_id, package_id = package.package_id, "created quote");

    let status: SyncStatus = evaluate(&transition.new_state, &package, &params);
    let breakdown: PriceBreakdownInfo = transition
        .new_state
        .last_breakdown
        .as_ref()
        .map(|b| breakdown_info(b, package.currency))
        .ok_or_else(|| ApiError::Internal {
            message: String::from("First link produced no breakdown"),
        })?;

    let response: CreateQuoteResponse = CreateQuoteResponse {
        quote: quote_summary(quote_id, &transition.new_state, &status),
        breakdown,
        message: format!(
            "Created quote {quote_id} against package '{}' v{}",
            package.name, package.version
        ),
    };

    Ok(ApiResult {
        response,
        audit_event: transition.audit_event,
        new_state: transition.new_state,
    })
}

/// Changes a quote's trip parameters.
///
/// The stored price is deliberately left alone: parameter changes surface as
/// an out-of-sync status, and the price moves only when a recalculated price
/// is explicitly applied.
///
/// # Errors
///
/// Returns an error if the quote does not exist or the parameters are
/// invalid.
pub fn update_trip_params<R: PackageRepository + QuoteRepository>(
    repo: &mut R,
    quote_id: i64,
    request: UpdateTripParamsRequest,
) -> Result<UpdateTripParamsResponse, ApiError> {
    validate_trip_fields(request.number_of_people, request.number_of_nights)?;

    let mut stored: StoredQuote = repo.load_quote(quote_id)?;
    stored.trip_params = TripParams::new(
        request.number_of_people,
        request.number_of_nights,
        request.arrival_date,
    );
    repo.save_quote(&stored)?;

    let package: SuperPackage = repo.load_package(stored.pricing.linked_package_id)?;
    let status: SyncStatus = evaluate(&stored.pricing, &package, &stored.trip_params);
    tracing::debug!(quote_id, status = %status, "trip parameters changed");

    Ok(UpdateTripParamsResponse {
        quote: quote_summary(quote_id, &stored.pricing, &status),
        message: format!("Updated trip parameters for quote {quote_id}"),
    })
}

/// Recalculates a quote's price against the current package version.
///
/// A dry run: nothing is persisted. The response carries the fresh
/// breakdown, the comparison with the stored price, and the package version
/// drift so the client can decide whether to apply.
///
/// # Errors
///
/// Returns an error if the quote or package does not exist, or if the
/// resolver cannot produce a price (an on-request cell surfaces as the
/// `price_on_request` rule).
pub fn recalculate_price<R: PackageRepository + QuoteRepository>(
    repo: &R,
    quote_id: i64,
) -> Result<RecalculatePriceResponse, ApiError> {
    let stored: StoredQuote = repo.load_quote(quote_id)?;
    let package: SuperPackage = repo.load_package(stored.pricing.linked_package_id)?;

    let recalc: Recalculation = recalculate(&stored.pricing, &package, &stored.trip_params)
        .map_err(translate_resolution_error)?;
    let status: SyncStatus = evaluate(&stored.pricing, &package, &stored.trip_params);

    Ok(RecalculatePriceResponse {
        quote_id,
        breakdown: breakdown_info(&recalc.breakdown, package.currency),
        comparison: comparison_info(&recalc.comparison),
        package_info: package_info(&package, stored.pricing.linked_package_version),
        trip_params: trip_params_info(stored.trip_params),
        sync_status: status.as_str().to_string(),
    })
}

/// Applies a recalculated price to a quote.
///
/// The submitted price is cross-checked against the submitted calculation's
/// total; a mismatch is rejected rather than silently trusting either
/// number. The handler re-reads the package so the quote links to the
/// version that is current at apply time, even if it moved after the
/// recalculation.
///
/// # Errors
///
/// Returns an error if the quote or package does not exist, the price is
/// not positive and finite, or the price does not match the calculation.
pub fn apply_quote_price<R: PackageRepository + QuoteRepository>(
    repo: &mut R,
    quote_id: i64,
    request: ApplyPriceRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<ApplyPriceResponse>, ApiError> {
    validate_price_field(request.new_price, "new_price")?;

    if (request.new_price - request.price_calculation.total_price).abs() > PRICE_MATCH_TOLERANCE {
        return Err(ApiError::InvalidInput {
            field: String::from("new_price"),
            message: format!(
                "Submitted price {} does not match the calculation total {}",
                request.new_price, request.price_calculation.total_price
            ),
        });
    }

    let stored: StoredQuote = repo.load_quote(quote_id)?;
    let package: SuperPackage = repo.load_package(stored.pricing.linked_package_id)?;

    let breakdown: PriceBreakdown = PriceBreakdown {
        price_per_person: request.price_calculation.price_per_person,
        tier_used: request.price_calculation.tier_used,
        tier_index: request.price_calculation.tier_index,
        period_used: request.price_calculation.period_used,
        number_of_people: request.price_calculation.number_of_people,
        total_price: request.price_calculation.total_price,
    };

    let transition: TransitionResult = trip_quote::apply_price(
        &stored.pricing,
        quote_id,
        &package,
        stored.trip_params,
        breakdown,
        actor,
        cause,
    );

    let updated: StoredQuote = StoredQuote {
        quote_id,
        trip_params: stored.trip_params,
        pricing: transition.new_state.clone(),
    };
    repo.save_quote(&updated)?;
    repo.record_audit_event(&transition.audit_event)?;
    tracing::info!(quote_id, price = request.new_price, "applied price");

    let status: SyncStatus = evaluate(&transition.new_state, &package, &stored.trip_params);
    let response: ApplyPriceResponse = ApplyPriceResponse {
        quote: quote_summary(quote_id, &transition.new_state, &status),
        message: format!(
            "Applied {} to quote {quote_id}",
            format_price(request.new_price, package.currency)
        ),
    };

    Ok(ApiResult {
        response,
        audit_event: transition.audit_event,
        new_state: transition.new_state,
    })
}

/// Sets a manual price on a quote.
///
/// # Errors
///
/// Returns an error if the quote does not exist or the price is not
/// positive and finite.
pub fn set_manual_quote_price<R: PackageRepository + QuoteRepository>(
    repo: &mut R,
    quote_id: i64,
    request: SetManualPriceRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<SetManualPriceResponse>, ApiError> {
    validate_price_field(request.price, "price")?;

    let stored: StoredQuote = repo.load_quote(quote_id)?;
    let package: SuperPackage = repo.load_package(stored.pricing.linked_package_id)?;

    let transition: TransitionResult =
        trip_quote::set_manual_price(&stored.pricing, quote_id, request.price, actor, cause);

    let updated: StoredQuote = StoredQuote {
        quote_id,
        trip_params: stored.trip_params,
        pricing: transition.new_state.clone(),
    };
    repo.save_quote(&updated)?;
    repo.record_audit_event(&transition.audit_event)?;
    tracing::info!(quote_id, price = request.price, "set manual price");

    let status: SyncStatus = evaluate(&transition.new_state, &package, &stored.trip_params);
    let response: SetManualPriceResponse = SetManualPriceResponse {
        quote: quote_summary(quote_id, &transition.new_state, &status),
        message: format!(
            "Set manual price {} on quote {quote_id}",
            format_price(request.price, package.currency)
        ),
    };

    Ok(ApiResult {
        response,
        audit_event: transition.audit_event,
        new_state: transition.new_state,
    })
}

/// Resets a quote to its calculated price, clearing any manual override.
///
/// # Errors
///
/// Returns an error if the quote or package does not exist, or if the
/// resolver cannot produce a price for the current parameters. The quote is
/// left untouched on failure.
pub fn reset_quote_price<R: PackageRepository + QuoteRepository>(
    repo: &mut R,
    quote_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<ResetPriceResponse>, ApiError> {
    let stored: StoredQuote = repo.load_quote(quote_id)?;
    let package: SuperPackage = repo.load_package(stored.pricing.linked_package_id)?;

    let transition: TransitionResult = trip_quote::reset_to_calculated(
        &stored.pricing,
        quote_id,
        &package,
        stored.trip_params,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let updated: StoredQuote = StoredQuote {
        quote_id,
        trip_params: stored.trip_params,
        pricing: transition.new_state.clone(),
    };
    repo.save_quote(&updated)?;
    repo.record_audit_event(&transition.audit_event)?;
    tracing::info!(quote_id, "reset to calculated price");

    let status: SyncStatus = evaluate(&transition.new_state, &package, &stored.trip_params);
    let response: ResetPriceResponse = ResetPriceResponse {
        quote: quote_summary(quote_id, &transition.new_state, &status),
        message: format!("Reset quote {quote_id} to its calculated price"),
    };

    Ok(ApiResult {
        response,
        audit_event: transition.audit_event,
        new_state: transition.new_state,
    })
}

/// Reads a quote's synchronization status.
///
/// # Errors
///
/// Returns an error if the quote or package does not exist.
pub fn get_sync_status<R: PackageRepository + QuoteRepository>(
    repo: &R,
    quote_id: i64,
) -> Result<GetSyncStatusResponse, ApiError> {
    let stored: StoredQuote = repo.load_quote(quote_id)?;
    let package: SuperPackage = repo.load_package(stored.pricing.linked_package_id)?;

    let status: SyncStatus = evaluate(&stored.pricing, &package, &stored.trip_params);

    Ok(GetSyncStatusResponse {
        quote_id,
        sync_status: status.as_str().to_string(),
        status_message: status.message().map(str::to_string),
        package_info: package_info(&package, stored.pricing.linked_package_version),
    })
}
