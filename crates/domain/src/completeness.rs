// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pricing matrix completeness checking.
//!
//! Completeness is **computed**, not stored. It must be checked before a
//! package version is treated as resolvable; the resolver's
//! `IncompleteMatrix` error is the runtime manifestation of a gap this check
//! should have caught at edit time.

use crate::types::{GroupSizeTier, PricingPeriod};
use serde::{Deserialize, Serialize};

/// One period × tier × duration combination with no price cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCell {
    /// The period's display name.
    pub period: String,
    /// The tier's display label.
    pub tier: String,
    /// The nights value with no cell.
    pub nights: u32,
}

/// Result of a completeness check over a pricing matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// Whether every period × tier × duration combination has a cell.
    pub is_valid: bool,
    /// Every combination with no cell, in matrix → tier → duration order.
    pub missing_cells: Vec<MissingCell>,
    /// Total number of combinations the matrix must cover.
    pub expected_cells: usize,
}

/// Checks that every period × tier × duration combination has a price cell.
///
/// An explicit on-request cell counts as present: "on request" is a valid
/// authored value, not a gap.
///
/// # Arguments
///
/// * `tiers` - The package's group-size tiers
/// * `durations` - The package's supported nights values
/// * `matrix` - The pricing periods to check
#[must_use]
pub fn validate_completeness(
    tiers: &[GroupSizeTier],
    durations: &[u32],
    matrix: &[PricingPeriod],
) -> CompletenessReport {
    let mut missing_cells: Vec<MissingCell> = Vec::new();

    for period in matrix {
        for (tier_index, tier) in tiers.iter().enumerate() {
            for &nights in durations {
                if period.price_point(tier_index, nights).is_none() {
                    missing_cells.push(MissingCell {
                        period: period.period.clone(),
                        tier: tier.label.clone(),
                        nights,
                    });
                }
            }
        }
    }

    CompletenessReport {
        is_valid: missing_cells.is_empty(),
        missing_cells,
        expected_cells: matrix.len() * tiers.len() * durations.len(),
    }
}
