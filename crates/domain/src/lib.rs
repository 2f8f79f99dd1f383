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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod completeness;
mod error;
mod resolver;
mod types;
mod validation;

pub use completeness::{CompletenessReport, MissingCell, validate_completeness};
pub use error::{DomainError, ResolutionError};
pub use resolver::{PriceBreakdown, month_name, resolve};
pub use types::{
    Currency, GroupSizeTier, PeriodType, PriceCell, PricePoint, PricingPeriod, SuperPackage,
    TripParams,
};
pub use validation::{
    validate_duration_options, validate_group_size_tiers, validate_package,
    validate_pricing_matrix,
};
