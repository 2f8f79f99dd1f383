// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during package authoring and structural validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Unsupported currency code.
    InvalidCurrency(String),
    /// Package name is empty or invalid.
    InvalidPackageName(String),
    /// A tier's minimum exceeds its maximum, or the range is degenerate.
    InvalidTierRange {
        /// The tier's display label.
        label: String,
        /// The invalid minimum.
        min_people: u32,
        /// The invalid maximum.
        max_people: u32,
    },
    /// Two tiers cover overlapping party-size ranges.
    OverlappingTiers {
        /// Label of the earlier (winning) tier.
        first: String,
        /// Label of the later (shadowed) tier.
        second: String,
    },
    /// A package must offer at least one duration option.
    EmptyDurationOptions,
    /// A duration option appears more than once.
    DuplicateDuration {
        /// The repeated nights value.
        nights: u32,
    },
    /// A duration option of zero nights is not a stay.
    ZeroDuration,
    /// A special period is missing its start or end date.
    MissingSpecialPeriodDates {
        /// The period's display name.
        period: String,
    },
    /// A special period's start date is after its end date.
    InvalidSpecialPeriodRange {
        /// The period's display name.
        period: String,
        /// The start date.
        start_date: Date,
        /// The end date.
        end_date: Date,
    },
    /// A month period must not carry explicit dates.
    UnexpectedPeriodDates {
        /// The period's display name.
        period: String,
    },
    /// A price point references a tier index that does not exist.
    UnknownTierIndex {
        /// The period's display name.
        period: String,
        /// The out-of-range tier index.
        tier_index: usize,
        /// The number of tiers the package defines.
        tier_count: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCurrency(code) => {
                write!(f, "Unsupported currency code '{code}' (expected GBP, EUR, or USD)")
            }
            Self::InvalidPackageName(msg) => write!(f, "Invalid package name: {msg}"),
            Self::InvalidTierRange {
                label,
                min_people,
                max_people,
            } => {
                write!(
                    f,
                    "Tier '{label}' has an invalid range: min {min_people} exceeds max {max_people}"
                )
            }
            Self::OverlappingTiers { first, second } => {
                write!(f, "Tiers '{first}' and '{second}' cover overlapping party sizes")
            }
            Self::EmptyDurationOptions => {
                write!(f, "Package must offer at least one duration option")
            }
            Self::DuplicateDuration { nights } => {
                write!(f, "Duration option {nights} nights is listed more than once")
            }
            Self::ZeroDuration => write!(f, "Duration options must be at least 1 night"),
            Self::MissingSpecialPeriodDates { period } => {
                write!(f, "Special period '{period}' is missing its start or end date")
            }
            Self::InvalidSpecialPeriodRange {
                period,
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Special period '{period}' starts {start_date} after it ends {end_date}"
                )
            }
            Self::UnexpectedPeriodDates { period } => {
                write!(f, "Month period '{period}' must not carry explicit dates")
            }
            Self::UnknownTierIndex {
                period,
                tier_index,
                tier_count,
            } => {
                write!(
                    f,
                    "Period '{period}' prices tier index {tier_index}, but only {tier_count} tiers exist"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Errors that can occur while resolving a price from a package matrix.
///
/// All variants are reported to the caller, never thrown uncaught. The
/// resolver never retries: its inputs are deterministic, so retrying without
/// new data cannot change the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionError {
    /// Party size falls outside every tier's range. A data-authoring gap;
    /// tiers should be authored to be exhaustive.
    NoMatchingTier {
        /// The unmatched party size.
        number_of_people: u32,
    },
    /// Requested nights value is absent from the package's duration options.
    UnsupportedDuration {
        /// The unsupported nights value.
        number_of_nights: u32,
        /// The nights values the package does support.
        supported: Vec<u32>,
    },
    /// Arrival date matches neither a special period nor a month period.
    NoMatchingPeriod {
        /// The unmatched arrival date.
        arrival_date: Date,
    },
    /// The tier/period/duration combination exists structurally but has no
    /// price point. A content-authoring defect, distinct from
    /// [`ResolutionError::PriceOnRequest`].
    IncompleteMatrix {
        /// The matched period's display name.
        period: String,
        /// The matched tier's display label.
        tier: String,
        /// The requested nights value.
        nights: u32,
    },
    /// The cell is explicitly marked "on request". A valid business outcome,
    /// not a system fault: the caller must present this to a human rather
    /// than retry, and must never coerce it to a zero price.
    PriceOnRequest {
        /// The matched period's display name.
        period: String,
        /// The matched tier's display label.
        tier: String,
    },
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatchingTier { number_of_people } => {
                write!(f, "No group size tier covers a party of {number_of_people}")
            }
            Self::UnsupportedDuration {
                number_of_nights,
                supported,
            } => {
                write!(
                    f,
                    "A stay of {number_of_nights} nights is not offered (supported: {supported:?})"
                )
            }
            Self::NoMatchingPeriod { arrival_date } => {
                write!(f, "No pricing period covers arrival date {arrival_date}")
            }
            Self::IncompleteMatrix {
                period,
                tier,
                nights,
            } => {
                write!(
                    f,
                    "Pricing matrix has no price for period '{period}', tier '{tier}', {nights} nights"
                )
            }
            Self::PriceOnRequest { period, tier } => {
                write!(f, "Price on request for period '{period}', tier '{tier}'")
            }
        }
    }
}

impl std::error::Error for ResolutionError {}
