// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::repository::RepositoryError;
use trip_quote::CoreError;
use trip_quote_domain::{DomainError, ResolutionError};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { resource, id } => Self::ResourceNotFound {
                resource_type: resource.clone(),
                message: format!("No {resource} with id {id} exists"),
            },
            RepositoryError::Storage { message } => Self::Internal { message },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCurrency(code) => ApiError::InvalidInput {
            field: String::from("currency"),
            message: format!("'{code}' is not a supported currency (GBP, EUR, USD)"),
        },
        DomainError::InvalidPackageName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidTierRange {
            label,
            min_people,
            max_people,
        } => ApiError::InvalidInput {
            field: String::from("group_size_tiers"),
            message: format!(
                "Tier '{label}' has an inverted range: min {min_people} exceeds max {max_people}"
            ),
        },
        DomainError::OverlappingTiers { first, second } => ApiError::DomainRuleViolation {
            rule: String::from("disjoint_tiers"),
            message: format!("Tiers '{first}' and '{second}' cover overlapping party sizes"),
        },
        DomainError::EmptyDurationOptions => ApiError::InvalidInput {
            field: String::from("duration_options"),
            message: String::from("At least one duration option is required"),
        },
        DomainError::DuplicateDuration { nights } => ApiError::InvalidInput {
            field: String::from("duration_options"),
            message: format!("Duration of {nights} nights is listed more than once"),
        },
        DomainError::ZeroDuration => ApiError::InvalidInput {
            field: String::from("duration_options"),
            message: String::from("A duration of 0 nights is not allowed"),
        },
        DomainError::MissingSpecialPeriodDates { period } => ApiError::InvalidInput {
            field: String::from("pricing_matrix"),
            message: format!("Special period '{period}' must carry both a start and an end date"),
        },
        DomainError::InvalidSpecialPeriodRange {
            period,
            start_date,
            end_date,
        } => ApiError::InvalidInput {
            field: String::from("pricing_matrix"),
            message: format!(
                "Special period '{period}' has start {start_date} after end {end_date}"
            ),
        },
        DomainError::UnexpectedPeriodDates { period } => ApiError::InvalidInput {
            field: String::from("pricing_matrix"),
            message: format!("Month period '{period}' must not carry dates"),
        },
        DomainError::UnknownTierIndex {
            period,
            tier_index,
            tier_count,
        } => ApiError::InvalidInput {
            field: String::from("pricing_matrix"),
            message: format!(
                "Period '{period}' references tier index {tier_index}, but only {tier_count} tiers exist"
            ),
        },
    }
}

/// Translates a resolution error into an API error.
///
/// Every variant maps to `DomainRuleViolation` with a machine-readable rule
/// tag: resolution failures are data or request problems, never internal
/// faults. `price_on_request` is a normal business outcome.
#[must_use]
pub fn translate_resolution_error(err: ResolutionError) -> ApiError {
    match err {
        ResolutionError::NoMatchingTier { number_of_people } => ApiError::DomainRuleViolation {
            rule: String::from("no_matching_tier"),
            message: format!("No pricing tier covers a party of {number_of_people}"),
        },
        ResolutionError::UnsupportedDuration {
            number_of_nights,
            supported,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unsupported_duration"),
            message: format!(
                "A stay of {number_of_nights} nights is not offered; supported durations are {supported:?}"
            ),
        },
        ResolutionError::NoMatchingPeriod { arrival_date } => ApiError::DomainRuleViolation {
            rule: String::from("no_matching_period"),
            message: format!("No pricing period covers the arrival date {arrival_date}"),
        },
        ResolutionError::IncompleteMatrix {
            period,
            tier,
            nights,
        } => ApiError::DomainRuleViolation {
            rule: String::from("incomplete_matrix"),
            message: format!(
                "No price is defined for period '{period}', tier '{tier}', {nights} nights"
            ),
        },
        ResolutionError::PriceOnRequest { period, tier } => ApiError::DomainRuleViolation {
            rule: String::from("price_on_request"),
            message: format!(
                "Period '{period}', tier '{tier}' is priced on request; enter a manual price"
            ),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ResolutionFailed(resolution_err) => translate_resolution_error(resolution_err),
    }
}
