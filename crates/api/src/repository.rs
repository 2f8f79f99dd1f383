// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence traits the API handlers work against.
//!
//! Handlers never know which store backs them; the server decides. Package
//! versions are immutable once saved: `save_package` stores the given
//! revision as the package's current version, and the previously linked
//! versions of existing quotes stay untouched so staleness detection keeps
//! working.

use thiserror::Error;
use trip_quote::QuotePriceState;
use trip_quote_audit::AuditEvent;
use trip_quote_domain::{SuperPackage, TripParams};

/// Errors a repository implementation may surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("{resource} {id} not found")]
    NotFound {
        /// The kind of record (e.g., "package", "quote").
        resource: String,
        /// The identifier that was looked up.
        id: i64,
    },
    /// The underlying store failed.
    #[error("storage failure: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },
}

/// A quote as the store keeps it: identity, trip parameters, and the price
/// state machine record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredQuote {
    /// The canonical quote identifier.
    pub quote_id: i64,
    /// The quote's current trip parameters.
    pub trip_params: TripParams,
    /// The quote's price state.
    pub pricing: QuotePriceState,
}

/// Storage for pricing packages.
pub trait PackageRepository {
    /// Allocates the next package identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot allocate an identifier.
    fn next_package_id(&mut self) -> Result<i64, RepositoryError>;

    /// Loads a package's current version.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such package exists.
    fn load_package(&self, package_id: i64) -> Result<SuperPackage, RepositoryError>;

    /// Stores a package revision as the package's current version.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the package.
    fn save_package(&mut self, package: &SuperPackage) -> Result<(), RepositoryError>;
}

/// Storage for quotes and their audit trail.
pub trait QuoteRepository {
    /// Allocates the next quote identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot allocate an identifier.
    fn next_quote_id(&mut self) -> Result<i64, RepositoryError>;

    /// Loads a quote.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such quote exists.
    fn load_quote(&self, quote_id: i64) -> Result<StoredQuote, RepositoryError>;

    /// Stores a quote, replacing any previous record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the quote.
    fn save_quote(&mut self, quote: &StoredQuote) -> Result<(), RepositoryError>;

    /// Appends an audit event to the quote's history.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the event.
    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<(), RepositoryError>;
}
