// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural validation for package pricing data.
//!
//! These checks run at authoring time, before a package version is
//! published. The resolver still fails closed on bad data that slips
//! through; it never guesses.

use crate::error::DomainError;
use crate::types::{GroupSizeTier, PeriodType, PricingPeriod, SuperPackage};

/// Validates that tier ranges are well-formed and non-overlapping.
///
/// Overlap is reported as an authoring error. The resolver still honors
/// first-match-in-declaration-order when fed overlapping tiers, so reporting
/// here does not change runtime behavior for existing bad data.
///
/// # Errors
///
/// Returns `DomainError::InvalidTierRange` if a tier's minimum exceeds its
/// maximum, or `DomainError::OverlappingTiers` for the first overlapping
/// pair found.
pub fn validate_group_size_tiers(tiers: &[GroupSizeTier]) -> Result<(), DomainError> {
    for tier in tiers {
        if tier.min_people > tier.max_people {
            return Err(DomainError::InvalidTierRange {
                label: tier.label.clone(),
                min_people: tier.min_people,
                max_people: tier.max_people,
            });
        }
    }

    for (index, first) in tiers.iter().enumerate() {
        for second in &tiers[index + 1..] {
            let disjoint: bool =
                first.max_people < second.min_people || second.max_people < first.min_people;
            if !disjoint {
                return Err(DomainError::OverlappingTiers {
                    first: first.label.clone(),
                    second: second.label.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validates the supported duration options.
///
/// # Errors
///
/// Returns an error if the list is empty, contains zero, or contains
/// duplicates.
pub fn validate_duration_options(durations: &[u32]) -> Result<(), DomainError> {
    if durations.is_empty() {
        return Err(DomainError::EmptyDurationOptions);
    }

    for (index, &nights) in durations.iter().enumerate() {
        if nights == 0 {
            return Err(DomainError::ZeroDuration);
        }
        if durations[index + 1..].contains(&nights) {
            return Err(DomainError::DuplicateDuration { nights });
        }
    }

    Ok(())
}

/// Validates the structural shape of a pricing matrix.
///
/// Special periods must carry an inclusive `start_date <= end_date`; month
/// periods must not carry dates. Price points must reference existing tiers.
///
/// Overlapping special periods are deliberately **not** rejected: the
/// resolver's first-match-in-matrix-order scan makes the tie-break
/// deterministic.
///
/// # Errors
///
/// Returns the first structural defect found.
pub fn validate_pricing_matrix(
    matrix: &[PricingPeriod],
    tier_count: usize,
) -> Result<(), DomainError> {
    for period in matrix {
        match period.period_type {
            PeriodType::Special => match (period.start_date, period.end_date) {
                (Some(start), Some(end)) => {
                    if start > end {
                        return Err(DomainError::InvalidSpecialPeriodRange {
                            period: period.period.clone(),
                            start_date: start,
                            end_date: end,
                        });
                    }
                }
                _ => {
                    return Err(DomainError::MissingSpecialPeriodDates {
                        period: period.period.clone(),
                    });
                }
            },
            PeriodType::Month => {
                if period.start_date.is_some() || period.end_date.is_some() {
                    return Err(DomainError::UnexpectedPeriodDates {
                        period: period.period.clone(),
                    });
                }
            }
        }

        for point in &period.prices {
            if point.tier_index >= tier_count {
                return Err(DomainError::UnknownTierIndex {
                    period: period.period.clone(),
                    tier_index: point.tier_index,
                    tier_count,
                });
            }
        }
    }

    Ok(())
}

/// Validates a whole package's structure: name, tiers, durations, matrix.
///
/// # Errors
///
/// Returns the first structural defect found.
pub fn validate_package(package: &SuperPackage) -> Result<(), DomainError> {
    if package.name.trim().is_empty() {
        return Err(DomainError::InvalidPackageName(String::from(
            "name must not be empty",
        )));
    }

    validate_group_size_tiers(&package.group_size_tiers)?;
    validate_duration_options(&package.duration_options)?;
    validate_pricing_matrix(&package.pricing_matrix, package.group_size_tiers.len())?;

    Ok(())
}
