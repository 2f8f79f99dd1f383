// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use time::Date;
use trip_quote_domain::{GroupSizeTier, PricingPeriod};

/// API request to create a new package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePackageRequest {
    /// Display name (e.g., "Algarve Golf Week").
    pub name: String,
    /// The ISO 4217 currency code (GBP, EUR, USD).
    pub currency: String,
    /// Group-size tiers, in priority order.
    pub group_size_tiers: Vec<GroupSizeTier>,
    /// Supported nights values.
    pub duration_options: Vec<u32>,
    /// The pricing periods, in matrix order.
    pub pricing_matrix: Vec<PricingPeriod>,
}

/// API response for a successful package creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePackageResponse {
    /// The canonical package identifier.
    pub package_id: i64,
    /// The package's display name.
    pub name: String,
    /// The package version (always 1 on creation).
    pub version: u32,
    /// Whether every period × tier × duration combination has a cell.
    pub is_complete: bool,
    /// A success message.
    pub message: String,
}

/// API request to revise a package's pricing data.
///
/// Every accepted revision bumps the package version, which flags linked
/// quotes as out of sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePackagePricingRequest {
    /// Group-size tiers, in priority order.
    pub group_size_tiers: Vec<GroupSizeTier>,
    /// Supported nights values.
    pub duration_options: Vec<u32>,
    /// The pricing periods, in matrix order.
    pub pricing_matrix: Vec<PricingPeriod>,
}

/// API response for a successful pricing revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePackagePricingResponse {
    /// The canonical package identifier.
    pub package_id: i64,
    /// The new package version.
    pub version: u32,
    /// Whether the revised matrix is complete.
    pub is_complete: bool,
    /// The number of period × tier × duration gaps in the revised matrix.
    pub missing_cell_count: usize,
    /// A success message.
    pub message: String,
}

/// One period × tier × duration combination with no price cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCellInfo {
    /// The period's display name.
    pub period: String,
    /// The tier's display label.
    pub tier: String,
    /// The nights value with no cell.
    pub nights: u32,
}

/// API response for a package completeness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPackageCompletenessResponse {
    /// The canonical package identifier.
    pub package_id: i64,
    /// The package version the check ran against.
    pub version: u32,
    /// Whether every period × tier × duration combination has a cell.
    pub is_valid: bool,
    /// Total number of combinations the matrix must cover.
    pub expected_cells: usize,
    /// Every combination with no cell.
    pub missing_cells: Vec<MissingCellInfo>,
}

/// Trip parameters as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripParamsInfo {
    /// Party size.
    pub number_of_people: u32,
    /// Stay length in nights.
    pub number_of_nights: u32,
    /// Arrival date.
    pub arrival_date: Date,
}

/// A resolved price breakdown as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdownInfo {
    /// The per-person price from the matched cell.
    pub price_per_person: f64,
    /// Display label of the matched tier.
    pub tier_used: String,
    /// Index of the matched tier.
    pub tier_index: usize,
    /// Display name of the matched period.
    pub period_used: String,
    /// The party size the total was scaled by.
    pub number_of_people: u32,
    /// `price_per_person * number_of_people`.
    pub total_price: f64,
    /// The total, formatted for display in the package currency.
    pub formatted_total: String,
}

/// The difference between a stored price and a freshly computed one, as it
/// appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparisonInfo {
    /// The quote's stored price.
    pub old_price: f64,
    /// The freshly computed price.
    pub new_price: f64,
    /// `new_price - old_price`.
    pub price_difference: f64,
    /// Percent change relative to the old price (0 when the old price is 0).
    pub percentage_change: f64,
    /// The stored price, formatted for display.
    pub formatted_old_price: String,
    /// The fresh price, formatted for display.
    pub formatted_new_price: String,
    /// The difference, formatted for display.
    pub formatted_difference: String,
}

/// Package identity and version drift, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// The canonical package identifier.
    pub package_id: i64,
    /// The package's display name.
    pub package_name: String,
    /// The package's current version.
    pub current_version: u32,
    /// The version the quote's price was last computed against.
    pub linked_version: u32,
    /// Whether the package moved past the linked version.
    pub version_changed: bool,
}

/// API response for a dry-run price recalculation.
///
/// Nothing is persisted; the client must follow up with an apply for the
/// fresh price to take effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalculatePriceResponse {
    /// The quote the recalculation ran for.
    pub quote_id: i64,
    /// The freshly resolved breakdown.
    pub breakdown: PriceBreakdownInfo,
    /// The comparison against the stored price.
    pub comparison: PriceComparisonInfo,
    /// Package identity and version drift.
    pub package_info: PackageInfo,
    /// The parameters the recalculation used, echoed back.
    pub trip_params: TripParamsInfo,
    /// The quote's current synchronization status indicator.
    pub sync_status: String,
}

/// The breakdown a client sends back when applying a recalculated price.
///
/// Mirrors [`PriceBreakdownInfo`] without the display-only field. The apply
/// handler cross-checks `total_price` against the submitted new price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCalculation {
    /// The per-person price from the matched cell.
    pub price_per_person: f64,
    /// Display label of the matched tier.
    pub tier_used: String,
    /// Index of the matched tier.
    pub tier_index: usize,
    /// Display name of the matched period.
    pub period_used: String,
    /// The party size the total was scaled by.
    pub number_of_people: u32,
    /// `price_per_person * number_of_people`.
    pub total_price: f64,
}

/// API request to apply a recalculated price to a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyPriceRequest {
    /// The price to persist. Must match the calculation's total.
    pub new_price: f64,
    /// The breakdown the price came from.
    pub price_calculation: PriceCalculation,
}

/// A quote's price state, summarized for responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// The canonical quote identifier.
    pub quote_id: i64,
    /// The quote's stored total price.
    pub total_price: f64,
    /// The stored price, formatted for display.
    pub formatted_price: String,
    /// The ISO 4217 currency code.
    pub currency: String,
    /// Whether the price is a manual override.
    pub is_manual_override: bool,
    /// The package the quote is linked to.
    pub linked_package_id: i64,
    /// The package version the price was last computed against.
    pub linked_package_version: u32,
    /// The quote's current synchronization status indicator.
    pub sync_status: String,
}

/// API response for a successful price application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyPriceResponse {
    /// The quote after the apply.
    pub quote: QuoteSummary,
    /// A success message.
    pub message: String,
}

/// API request to create a quote linked to a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuoteRequest {
    /// The package to link the quote to.
    pub package_id: i64,
    /// Party size.
    pub number_of_people: u32,
    /// Stay length in nights.
    pub number_of_nights: u32,
    /// Arrival date.
    pub arrival_date: Date,
}

/// API response for a successful quote creation.
///
/// The initial price is computed and applied as part of the first link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQuoteResponse {
    /// The quote after the first link.
    pub quote: QuoteSummary,
    /// The breakdown the initial price came from.
    pub breakdown: PriceBreakdownInfo,
    /// A success message.
    pub message: String,
}

/// API request to change a quote's trip parameters.
///
/// Changing parameters never reprices by itself; the stored price stays put
/// and the sync status flags the drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTripParamsRequest {
    /// Party size.
    pub number_of_people: u32,
    /// Stay length in nights.
    pub number_of_nights: u32,
    /// Arrival date.
    pub arrival_date: Date,
}

/// API response for a trip parameter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTripParamsResponse {
    /// The quote with its refreshed sync status.
    pub quote: QuoteSummary,
    /// A success message.
    pub message: String,
}

/// API request to set a manual price on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetManualPriceRequest {
    /// The price to set. Must be positive and finite.
    pub price: f64,
}

/// API response for a manual price entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetManualPriceResponse {
    /// The quote after the manual entry.
    pub quote: QuoteSummary,
    /// A success message.
    pub message: String,
}

/// API response for a reset to the calculated price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetPriceResponse {
    /// The quote after the reset.
    pub quote: QuoteSummary,
    /// A success message.
    pub message: String,
}

/// API response for a synchronization status read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSyncStatusResponse {
    /// The canonical quote identifier.
    pub quote_id: i64,
    /// The synchronization status indicator.
    pub sync_status: String,
    /// The resolver's message when the status is "error".
    pub status_message: Option<String>,
    /// Package identity and version drift.
    pub package_info: PackageInfo,
}
