// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use trip_quote_domain::{DomainError, ResolutionError};

/// Errors that can occur during price transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A package authoring rule was violated.
    DomainViolation(DomainError),
    /// The resolver could not produce a price.
    ResolutionFailed(ResolutionError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ResolutionFailed(err) => write!(f, "Price resolution failed: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<ResolutionError> for CoreError {
    fn from(err: ResolutionError) -> Self {
        Self::ResolutionFailed(err)
    }
}
