// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Price resolution.
//!
//! Given trip parameters and one immutable package version, the resolver
//! selects the matching tier, period, and duration cell and returns a full
//! price breakdown or a typed failure. It is a pure function of its inputs:
//! the month name used for period matching derives from the arrival date,
//! never from an ambient clock.

use crate::error::ResolutionError;
use crate::types::{PeriodType, PriceCell, PricingPeriod, SuperPackage, TripParams};
use serde::{Deserialize, Serialize};
use time::Month;

/// How a resolved price was arrived at.
///
/// Derived by the resolver; persisted on the quote only as the record of the
/// last applied computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Per-person price from the matched cell.
    pub price_per_person: f64,
    /// Display label of the matched tier.
    pub tier_used: String,
    /// Index of the matched tier within the package's tier list.
    pub tier_index: usize,
    /// Display name of the matched period.
    pub period_used: String,
    /// The party size the total was scaled by.
    pub number_of_people: u32,
    /// `price_per_person * number_of_people`.
    pub total_price: f64,
}

/// Returns the English name of a calendar month.
#[must_use]
pub const fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

/// Selects the pricing period for an arrival date.
///
/// Special periods are tested first, in matrix order, by inclusive date
/// containment; the first match wins even when later special periods also
/// contain the date. Only if no special period matches does the month period
/// whose name equals the arrival month's English name apply.
fn select_period<'a>(package: &'a SuperPackage, params: &TripParams) -> Option<&'a PricingPeriod> {
    let special: Option<&PricingPeriod> = package
        .pricing_matrix
        .iter()
        .find(|period| period.contains_date(params.arrival_date));

    if special.is_some() {
        return special;
    }

    let arrival_month: &str = month_name(params.arrival_date.month());
    package.pricing_matrix.iter().find(|period| {
        period.period_type == PeriodType::Month && period.period.eq_ignore_ascii_case(arrival_month)
    })
}

/// Resolves a price from one immutable package version.
///
/// # Arguments
///
/// * `package` - The package version to price against
/// * `params` - The trip parameters
///
/// # Returns
///
/// A full [`PriceBreakdown`] on success. Pricing is per-person, scaled by
/// headcount: `total_price = price_per_person * number_of_people`.
///
/// # Errors
///
/// * [`ResolutionError::NoMatchingTier`] - party size outside every tier
/// * [`ResolutionError::UnsupportedDuration`] - nights not offered
/// * [`ResolutionError::NoMatchingPeriod`] - arrival date not covered
/// * [`ResolutionError::IncompleteMatrix`] - cell missing (data defect)
/// * [`ResolutionError::PriceOnRequest`] - cell explicitly on request
pub fn resolve(
    package: &SuperPackage,
    params: &TripParams,
) -> Result<PriceBreakdown, ResolutionError> {
    // Tier selection is order-sensitive: first declared match wins.
    let (tier_index, tier) = package
        .group_size_tiers
        .iter()
        .enumerate()
        .find(|(_, tier)| tier.contains(params.number_of_people))
        .ok_or(ResolutionError::NoMatchingTier {
            number_of_people: params.number_of_people,
        })?;

    if !package.supports_duration(params.number_of_nights) {
        return Err(ResolutionError::UnsupportedDuration {
            number_of_nights: params.number_of_nights,
            supported: package.duration_options.clone(),
        });
    }

    let period: &PricingPeriod =
        select_period(package, params).ok_or(ResolutionError::NoMatchingPeriod {
            arrival_date: params.arrival_date,
        })?;

    let point = period
        .price_point(tier_index, params.number_of_nights)
        .ok_or_else(|| ResolutionError::IncompleteMatrix {
            period: period.period.clone(),
            tier: tier.label.clone(),
            nights: params.number_of_nights,
        })?;

    let price_per_person: f64 = match point.price {
        PriceCell::Numeric(value) => value,
        PriceCell::OnRequest => {
            return Err(ResolutionError::PriceOnRequest {
                period: period.period.clone(),
                tier: tier.label.clone(),
            });
        }
    };

    let total_price: f64 = price_per_person * f64::from(params.number_of_people);

    Ok(PriceBreakdown {
        price_per_person,
        tier_used: tier.label.clone(),
        tier_index,
        period_used: period.period.clone(),
        number_of_people: params.number_of_people,
        total_price,
    })
}
