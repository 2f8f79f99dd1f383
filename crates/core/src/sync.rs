// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Price synchronization engine.
//!
//! Classifies whether a quote's stored price still matches what the linked
//! package's current version would produce, and builds the dry-run
//! recalculation the UI confirms before applying.

use crate::state::QuotePriceState;
use trip_quote_domain::{
    Currency, PriceBreakdown, ResolutionError, SuperPackage, TripParams, resolve,
};

/// The five-state classification of a quote's price relative to its package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Transient UI-only state while a resolve call is in flight. Set
    /// optimistically by the caller; [`evaluate`] never derives it.
    Calculating,
    /// The most recent resolve attempt failed.
    Error {
        /// The resolver's message, surfaced verbatim ("price on request"
        /// for an on-request cell).
        message: String,
    },
    /// The price was entered by hand and is intentionally decoupled from
    /// the matrix. Takes precedence over staleness checks.
    Custom,
    /// The trip parameters or the package pricing changed since the price
    /// was last applied.
    OutOfSync,
    /// The stored price matches what the resolver would currently produce.
    Synced,
}

impl SyncStatus {
    /// Converts this status to its indicator string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Calculating => "calculating",
            Self::Error { .. } => "error",
            Self::Custom => "custom",
            Self::OutOfSync => "out-of-sync",
            Self::Synced => "synced",
        }
    }

    /// Returns the error message if this is an error status.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The difference between a stored price and a freshly computed one.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceComparison {
    /// The quote's stored price.
    pub old_price: f64,
    /// The freshly computed price.
    pub new_price: f64,
    /// `new_price - old_price`.
    pub price_difference: f64,
    /// `price_difference / old_price * 100`, or 0 when `old_price` is 0.
    pub percentage_change: f64,
    /// The currency both prices are denominated in.
    pub currency: Currency,
}

impl PriceComparison {
    /// Builds a comparison between a stored and a freshly computed price.
    #[must_use]
    pub fn between(old_price: f64, new_price: f64, currency: Currency) -> Self {
        let price_difference: f64 = new_price - old_price;
        let percentage_change: f64 = if old_price.abs() < f64::EPSILON {
            0.0
        } else {
            price_difference / old_price * 100.0
        };

        Self {
            old_price,
            new_price,
            price_difference,
            percentage_change,
            currency,
        }
    }
}

/// A dry-run recalculation: the fresh breakdown plus the comparison against
/// the quote's stored price. Nothing is persisted until the caller applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Recalculation {
    /// The freshly resolved breakdown.
    pub breakdown: PriceBreakdown,
    /// The comparison against the stored price.
    pub comparison: PriceComparison,
}

/// Checks whether the trip parameters differ from the last applied ones.
///
/// A quote that has never had parameters recorded counts as drifted.
fn params_drifted(quote: &QuotePriceState, current_params: &TripParams) -> bool {
    quote
        .last_computed_params
        .is_none_or(|last| last != *current_params)
}

/// Derives the synchronization status of a quote.
///
/// Decision order (first match wins):
/// 1. a fresh resolve against the current package and parameters fails ⇒
///    [`SyncStatus::Error`] (an on-request cell surfaces as the message
///    "price on request");
/// 2. the price is a manual override ⇒ [`SyncStatus::Custom`] — a manual
///    price is never flagged stale by parameter or version drift;
/// 3. the parameters differ from the last applied ones, or the package
///    version moved past the linked version ⇒ [`SyncStatus::OutOfSync`];
/// 4. otherwise ⇒ [`SyncStatus::Synced`].
///
/// [`SyncStatus::Calculating`] is never returned: it is the caller's
/// optimistic in-flight state.
#[must_use]
pub fn evaluate(
    quote: &QuotePriceState,
    current_package: &SuperPackage,
    current_params: &TripParams,
) -> SyncStatus {
    if let Err(error) = resolve(current_package, current_params) {
        let message: String = match error {
            ResolutionError::PriceOnRequest { .. } => String::from("price on request"),
            other => other.to_string(),
        };
        return SyncStatus::Error { message };
    }

    if quote.is_manual_override {
        return SyncStatus::Custom;
    }

    if params_drifted(quote, current_params)
        || current_package.version != quote.linked_package_version
    {
        return SyncStatus::OutOfSync;
    }

    SyncStatus::Synced
}

/// Recalculates a quote's price without mutating anything.
///
/// Always invokes the resolver fresh against the current package version,
/// ignoring any cached breakdown. The caller must explicitly apply the
/// result for it to take effect.
///
/// # Errors
///
/// Propagates the resolver's failure verbatim; no local recovery or retry
/// is attempted.
pub fn recalculate(
    quote: &QuotePriceState,
    current_package: &SuperPackage,
    current_params: &TripParams,
) -> Result<Recalculation, ResolutionError> {
    let breakdown: PriceBreakdown = resolve(current_package, current_params)?;
    let comparison: PriceComparison = PriceComparison::between(
        quote.total_price,
        breakdown.total_price,
        current_package.currency,
    );

    Ok(Recalculation {
        breakdown,
        comparison,
    })
}
