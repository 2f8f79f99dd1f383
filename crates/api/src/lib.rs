// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

pub mod currency;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use currency::format_price;
pub use error::{ApiError, translate_core_error, translate_domain_error, translate_resolution_error};
pub use handlers::{
    ApiResult, apply_quote_price, create_package, create_quote, get_package_completeness,
    get_sync_status, recalculate_price, reset_quote_price, set_manual_quote_price,
    update_package_pricing, update_trip_params,
};
pub use repository::{PackageRepository, QuoteRepository, RepositoryError, StoredQuote};
pub use request_response::{
    ApplyPriceRequest, ApplyPriceResponse, CreatePackageRequest, CreatePackageResponse,
    CreateQuoteRequest, CreateQuoteResponse, GetPackageCompletenessResponse,
    GetSyncStatusResponse, MissingCellInfo, PackageInfo, PriceBreakdownInfo, PriceCalculation,
    PriceComparisonInfo, QuoteSummary, RecalculatePriceResponse, ResetPriceResponse,
    SetManualPriceRequest, SetManualPriceResponse, TripParamsInfo, UpdatePackagePricingRequest,
    UpdatePackagePricingResponse, UpdateTripParamsRequest, UpdateTripParamsResponse,
};
