// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::HashMap;

use time::{Date, Month};
use trip_quote_audit::{Actor, AuditEvent, Cause};
use trip_quote_domain::{GroupSizeTier, PriceCell, PricePoint, PricingPeriod, SuperPackage};

use crate::handlers::{create_package, create_quote};
use crate::repository::{PackageRepository, QuoteRepository, RepositoryError, StoredQuote};
use crate::request_response::{CreatePackageRequest, CreateQuoteRequest};

/// In-memory store backing the handler tests.
pub struct TestStore {
    packages: HashMap<i64, SuperPackage>,
    quotes: HashMap<i64, StoredQuote>,
    pub audit_log: Vec<AuditEvent>,
    next_package_id: i64,
    next_quote_id: i64,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            quotes: HashMap::new(),
            audit_log: Vec::new(),
            next_package_id: 1,
            next_quote_id: 1,
        }
    }
}

impl PackageRepository for TestStore {
    fn next_package_id(&mut self) -> Result<i64, RepositoryError> {
        let id: i64 = self.next_package_id;
        self.next_package_id += 1;
        Ok(id)
    }

    fn load_package(&self, package_id: i64) -> Result<SuperPackage, RepositoryError> {
        self.packages
            .get(&package_id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                resource: String::from("package"),
                id: package_id,
            })
    }

    fn save_package(&mut self, package: &SuperPackage) -> Result<(), RepositoryError> {
        self.packages.insert(package.package_id, package.clone());
        Ok(())
    }
}

impl QuoteRepository for TestStore {
    fn next_quote_id(&mut self) -> Result<i64, RepositoryError> {
        let id: i64 = self.next_quote_id;
        self.next_quote_id += 1;
        Ok(id)
    }

    fn load_quote(&self, quote_id: i64) -> Result<StoredQuote, RepositoryError> {
        self.quotes
            .get(&quote_id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                resource: String::from("quote"),
                id: quote_id,
            })
    }

    fn save_quote(&mut self, quote: &StoredQuote) -> Result<(), RepositoryError> {
        self.quotes.insert(quote.quote_id, quote.clone());
        Ok(())
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<(), RepositoryError> {
        self.audit_log.push(event.clone());
        Ok(())
    }
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn august(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::August, day).unwrap()
}

/// A GBP package with Small (1-4) and Large (5-10) tiers, 3- and 7-night
/// durations, and a complete August month period.
pub fn august_package_request() -> CreatePackageRequest {
    CreatePackageRequest {
        name: String::from("Algarve Golf Week"),
        currency: String::from("GBP"),
        group_size_tiers: vec![
            GroupSizeTier::new(String::from("Small Group"), 1, 4),
            GroupSizeTier::new(String::from("Large Group"), 5, 10),
        ],
        duration_options: vec![3, 7],
        pricing_matrix: vec![PricingPeriod::month(
            String::from("August"),
            vec![
                PricePoint::new(0, 3, PriceCell::Numeric(500.0)),
                PricePoint::new(0, 7, PriceCell::Numeric(900.0)),
                PricePoint::new(1, 3, PriceCell::Numeric(850.0)),
                PricePoint::new(1, 7, PriceCell::Numeric(1500.0)),
            ],
        )],
    }
}

/// Seeds a store with the August package and returns its id.
pub fn store_with_package() -> (TestStore, i64) {
    let mut store: TestStore = TestStore::new();
    let response = create_package(&mut store, august_package_request()).unwrap();
    (store, response.package_id)
}

/// Seeds a store with the August package and a quote for 3 people, 7 nights,
/// arriving August 10 (stored price 2700.00). Returns (store, package id,
/// quote id).
pub fn store_with_quote() -> (TestStore, i64, i64) {
    let (mut store, package_id) = store_with_package();
    let request: CreateQuoteRequest = CreateQuoteRequest {
        package_id,
        number_of_people: 3,
        number_of_nights: 7,
        arrival_date: august(10),
    };
    let result = create_quote(&mut store, request, create_test_actor(), create_test_cause())
        .unwrap();
    (store, package_id, result.response.quote.quote_id)
}
