// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The currencies a package may be priced in.
///
/// Only these three codes are supported; quotes inherit the currency of the
/// package they are linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Pound sterling.
    #[default]
    GBP,
    /// Euro.
    EUR,
    /// United States dollar.
    USD,
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GBP" => Ok(Self::GBP),
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            _ => Err(DomainError::InvalidCurrency(s.to_string())),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Currency {
    /// Converts this currency to its ISO 4217 code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GBP => "GBP",
            Self::EUR => "EUR",
            Self::USD => "USD",
        }
    }
}

/// A group-size bracket with its own per-person pricing.
///
/// Tiers partition the party-size axis. Declaration order defines priority:
/// the resolver selects the first tier whose range contains the party size,
/// even when a later tier's range also contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSizeTier {
    /// Display label for this tier (e.g., "Small Group").
    pub label: String,
    /// Minimum party size covered by this tier (inclusive).
    pub min_people: u32,
    /// Maximum party size covered by this tier (inclusive).
    pub max_people: u32,
}

impl GroupSizeTier {
    /// Creates a new `GroupSizeTier`.
    ///
    /// # Arguments
    ///
    /// * `label` - Display label for the tier
    /// * `min_people` - Minimum party size (inclusive)
    /// * `max_people` - Maximum party size (inclusive)
    #[must_use]
    pub const fn new(label: String, min_people: u32, max_people: u32) -> Self {
        Self {
            label,
            min_people,
            max_people,
        }
    }

    /// Checks whether a party size falls within this tier's range.
    #[must_use]
    pub const fn contains(&self, number_of_people: u32) -> bool {
        self.min_people <= number_of_people && number_of_people <= self.max_people
    }
}

/// How a pricing period matches an arrival date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Matches by calendar month name of the arrival date (e.g., "July").
    Month,
    /// Matches by inclusive date-range containment of the arrival date.
    /// Special periods take priority over month periods.
    Special,
}

/// A single matrix cell value: either a per-person price or an explicit
/// "on request" marker.
///
/// This is a tagged variant rather than a loose number-or-string so that
/// downstream arithmetic cannot accidentally operate on the sentinel. On the
/// wire it is a JSON number or the literal string `"ON_REQUEST"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceCell {
    /// A per-person price in the package currency.
    Numeric(f64),
    /// No automatic price; a human must quote manually.
    OnRequest,
}

/// The wire token for an on-request cell.
pub(crate) const ON_REQUEST_TOKEN: &str = "ON_REQUEST";

impl Serialize for PriceCell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Numeric(value) => serializer.serialize_f64(*value),
            Self::OnRequest => serializer.serialize_str(ON_REQUEST_TOKEN),
        }
    }
}

impl<'de> Deserialize<'de> for PriceCell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CellVisitor;

        impl serde::de::Visitor<'_> for CellVisitor {
            type Value = PriceCell;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "a number or the string \"{ON_REQUEST_TOKEN}\"")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(PriceCell::Numeric(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                #[allow(clippy::cast_precision_loss)]
                Ok(PriceCell::Numeric(value as f64))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                #[allow(clippy::cast_precision_loss)]
                Ok(PriceCell::Numeric(value as f64))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value == ON_REQUEST_TOKEN {
                    Ok(PriceCell::OnRequest)
                } else {
                    Err(E::invalid_value(serde::de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// One priced cell of a pricing period, keyed by tier index and nights.
///
/// A missing `PricePoint` for a requested combination is a data-completeness
/// defect, distinct from an explicit `OnRequest` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Index into the package's `group_size_tiers`.
    pub tier_index: usize,
    /// The nights value this price applies to.
    pub nights: u32,
    /// The per-person price or on-request marker.
    pub price: PriceCell,
}

impl PricePoint {
    /// Creates a new `PricePoint`.
    #[must_use]
    pub const fn new(tier_index: usize, nights: u32, price: PriceCell) -> Self {
        Self {
            tier_index,
            nights,
            price,
        }
    }
}

/// A calendar window with its own pricing.
///
/// `Month` periods match by the English month name of the arrival date and
/// carry no dates. `Special` periods match by inclusive date-range
/// containment and take priority over month periods. When multiple special
/// periods overlap the same date, the first one in matrix order wins; this
/// is a documented tie-break, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPeriod {
    /// Display name: a month name for `Month` periods (e.g., "July"),
    /// free-form for `Special` periods (e.g., "Christmas Week").
    pub period: String,
    /// How this period matches an arrival date.
    pub period_type: PeriodType,
    /// Start of the date range (inclusive). `Special` periods only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// End of the date range (inclusive). `Special` periods only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    /// The price cells defined for this period.
    pub prices: Vec<PricePoint>,
}

impl PricingPeriod {
    /// Creates a month-typed period.
    ///
    /// # Arguments
    ///
    /// * `period` - The month name (e.g., "July")
    /// * `prices` - The price cells for this period
    #[must_use]
    pub const fn month(period: String, prices: Vec<PricePoint>) -> Self {
        Self {
            period,
            period_type: PeriodType::Month,
            start_date: None,
            end_date: None,
            prices,
        }
    }

    /// Creates a special (date-ranged) period.
    ///
    /// # Arguments
    ///
    /// * `period` - Display name for the period
    /// * `start_date` - Start of the range (inclusive)
    /// * `end_date` - End of the range (inclusive)
    /// * `prices` - The price cells for this period
    #[must_use]
    pub const fn special(
        period: String,
        start_date: Date,
        end_date: Date,
        prices: Vec<PricePoint>,
    ) -> Self {
        Self {
            period,
            period_type: PeriodType::Special,
            start_date: Some(start_date),
            end_date: Some(end_date),
            prices,
        }
    }

    /// Checks whether a special period's date range contains the given date
    /// (inclusive on both ends).
    ///
    /// Returns `false` for month periods or when either bound is missing.
    #[must_use]
    pub fn contains_date(&self, date: Date) -> bool {
        match (self.period_type, self.start_date, self.end_date) {
            (PeriodType::Special, Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Looks up the price cell for a (tier index, nights) combination.
    #[must_use]
    pub fn price_point(&self, tier_index: usize, nights: u32) -> Option<&PricePoint> {
        self.prices
            .iter()
            .find(|point| point.tier_index == tier_index && point.nights == nights)
    }
}

/// A versioned, reusable pricing template that quotes link to.
///
/// Each edit to tiers, durations, or any price increments `version`. The
/// resolver always operates against one immutable version's matrix, which
/// lets the synchronization engine detect staleness by comparing the version
/// a quote was linked against to the package's current version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperPackage {
    /// The canonical package identifier.
    pub package_id: i64,
    /// Display name (e.g., "Algarve Golf Week").
    pub name: String,
    /// Monotonically increasing revision counter. Starts at 1.
    pub version: u32,
    /// The currency every price in the matrix is denominated in.
    pub currency: Currency,
    /// Group-size tiers, in priority order.
    pub group_size_tiers: Vec<GroupSizeTier>,
    /// Supported nights values. Quotes requesting other values fail closed.
    pub duration_options: Vec<u32>,
    /// The pricing periods, in matrix order.
    pub pricing_matrix: Vec<PricingPeriod>,
}

impl SuperPackage {
    /// Creates a new package at version 1.
    ///
    /// # Arguments
    ///
    /// * `package_id` - The canonical package identifier
    /// * `name` - Display name
    /// * `currency` - The matrix currency
    /// * `group_size_tiers` - Tiers in priority order
    /// * `duration_options` - Supported nights values
    /// * `pricing_matrix` - Periods in matrix order
    #[must_use]
    pub const fn new(
        package_id: i64,
        name: String,
        currency: Currency,
        group_size_tiers: Vec<GroupSizeTier>,
        duration_options: Vec<u32>,
        pricing_matrix: Vec<PricingPeriod>,
    ) -> Self {
        Self {
            package_id,
            name,
            version: 1,
            currency,
            group_size_tiers,
            duration_options,
            pricing_matrix,
        }
    }

    /// Returns a copy of this package with new pricing data and the version
    /// incremented.
    ///
    /// Every edit to tiers, durations, or prices must go through here so
    /// that linked quotes can detect staleness.
    #[must_use]
    pub fn with_revised_pricing(
        &self,
        group_size_tiers: Vec<GroupSizeTier>,
        duration_options: Vec<u32>,
        pricing_matrix: Vec<PricingPeriod>,
    ) -> Self {
        Self {
            package_id: self.package_id,
            name: self.name.clone(),
            version: self.version + 1,
            currency: self.currency,
            group_size_tiers,
            duration_options,
            pricing_matrix,
        }
    }

    /// Checks whether a nights value is a supported duration.
    #[must_use]
    pub fn supports_duration(&self, nights: u32) -> bool {
        self.duration_options.contains(&nights)
    }
}

/// The trip parameters a price is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripParams {
    /// Party size.
    pub number_of_people: u32,
    /// Stay length in nights.
    pub number_of_nights: u32,
    /// Arrival date. Period matching is a pure function of this date.
    pub arrival_date: Date,
}

impl TripParams {
    /// Creates new `TripParams`.
    #[must_use]
    pub const fn new(number_of_people: u32, number_of_nights: u32, arrival_date: Date) -> Self {
        Self {
            number_of_people,
            number_of_nights,
            arrival_date,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn test_currency_round_trip() {
        for code in ["GBP", "EUR", "USD"] {
            let currency: Currency = code.parse().unwrap();
            assert_eq!(currency.as_str(), code);
        }
    }

    #[test]
    fn test_currency_rejects_unknown_code() {
        let result: Result<Currency, DomainError> = "JPY".parse();
        assert_eq!(result, Err(DomainError::InvalidCurrency(String::from("JPY"))));
    }

    #[test]
    fn test_tier_contains_is_inclusive() {
        let tier: GroupSizeTier = GroupSizeTier::new(String::from("Small"), 1, 4);
        assert!(tier.contains(1));
        assert!(tier.contains(4));
        assert!(!tier.contains(0));
        assert!(!tier.contains(5));
    }

    #[test]
    fn test_special_period_containment_is_inclusive() {
        let start: Date = Date::from_calendar_date(2026, Month::July, 20).unwrap();
        let end: Date = Date::from_calendar_date(2026, Month::July, 27).unwrap();
        let period: PricingPeriod =
            PricingPeriod::special(String::from("Peak Week"), start, end, vec![]);

        assert!(period.contains_date(start));
        assert!(period.contains_date(end));
        assert!(period.contains_date(Date::from_calendar_date(2026, Month::July, 23).unwrap()));
        assert!(!period.contains_date(Date::from_calendar_date(2026, Month::July, 28).unwrap()));
    }

    #[test]
    fn test_month_period_never_contains_dates() {
        let period: PricingPeriod = PricingPeriod::month(String::from("July"), vec![]);
        assert!(!period.contains_date(Date::from_calendar_date(2026, Month::July, 1).unwrap()));
    }

    #[test]
    fn test_price_cell_serde_numeric_and_on_request() {
        let period: PricingPeriod = PricingPeriod::month(
            String::from("July"),
            vec![
                PricePoint::new(0, 7, PriceCell::Numeric(900.0)),
                PricePoint::new(1, 7, PriceCell::OnRequest),
            ],
        );

        let json: String = serde_json::to_string(&period).unwrap();
        assert!(json.contains("900"));
        assert!(json.contains("\"ON_REQUEST\""));

        let parsed: PricingPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, period);
    }

    #[test]
    fn test_price_cell_rejects_other_strings() {
        let result: Result<PriceCell, _> = serde_json::from_str("\"CALL_US\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_revised_pricing_bumps_version() {
        let package: SuperPackage = SuperPackage::new(
            1,
            String::from("Algarve Golf Week"),
            Currency::GBP,
            vec![GroupSizeTier::new(String::from("Small"), 1, 4)],
            vec![3, 7],
            vec![],
        );
        assert_eq!(package.version, 1);

        let revised: SuperPackage = package.with_revised_pricing(
            package.group_size_tiers.clone(),
            package.duration_options.clone(),
            package.pricing_matrix.clone(),
        );
        assert_eq!(revised.version, 2);
        assert_eq!(revised.package_id, package.package_id);
    }
}
