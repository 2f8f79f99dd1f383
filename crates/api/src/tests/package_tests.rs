// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for package authoring handlers.

use trip_quote_domain::{GroupSizeTier, PriceCell, PricePoint, PricingPeriod};

use crate::error::ApiError;
use crate::handlers::{create_package, get_package_completeness, update_package_pricing};
use crate::request_response::{
    CreatePackageRequest, CreatePackageResponse, GetPackageCompletenessResponse,
    UpdatePackagePricingRequest, UpdatePackagePricingResponse,
};
use crate::tests::helpers::{TestStore, august_package_request, store_with_package};

#[test]
fn test_create_package_starts_at_version_one() {
    let mut store: TestStore = TestStore::new();

    let response: CreatePackageResponse =
        create_package(&mut store, august_package_request()).unwrap();

    assert_eq!(response.version, 1);
    assert!(response.is_complete);
    assert_eq!(response.name, "Algarve Golf Week");
}

#[test]
fn test_create_package_rejects_unknown_currency() {
    let mut store: TestStore = TestStore::new();
    let mut request: CreatePackageRequest = august_package_request();
    request.currency = String::from("JPY");

    let error: ApiError = create_package(&mut store, request).unwrap_err();

    assert!(matches!(error, ApiError::InvalidInput { ref field, .. } if field == "currency"));
}

#[test]
fn test_create_package_rejects_overlapping_tiers() {
    let mut store: TestStore = TestStore::new();
    let mut request: CreatePackageRequest = august_package_request();
    request.group_size_tiers = vec![
        GroupSizeTier::new(String::from("A"), 1, 6),
        GroupSizeTier::new(String::from("B"), 4, 10),
    ];

    let error: ApiError = create_package(&mut store, request).unwrap_err();

    assert!(matches!(
        error,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "disjoint_tiers"
    ));
}

#[test]
fn test_incomplete_matrix_is_accepted_and_flagged() {
    let mut store: TestStore = TestStore::new();
    let mut request: CreatePackageRequest = august_package_request();
    request.pricing_matrix = vec![PricingPeriod::month(
        String::from("August"),
        vec![PricePoint::new(0, 3, PriceCell::Numeric(500.0))],
    )];

    let response: CreatePackageResponse = create_package(&mut store, request).unwrap();

    assert!(!response.is_complete);
}

#[test]
fn test_update_pricing_bumps_version() {
    let (mut store, package_id) = store_with_package();
    let source: CreatePackageRequest = august_package_request();

    let request: UpdatePackagePricingRequest = UpdatePackagePricingRequest {
        group_size_tiers: source.group_size_tiers,
        duration_options: source.duration_options,
        pricing_matrix: source.pricing_matrix,
    };
    let response: UpdatePackagePricingResponse =
        update_package_pricing(&mut store, package_id, request).unwrap();

    assert_eq!(response.version, 2);
    assert!(response.is_complete);
    assert_eq!(response.missing_cell_count, 0);
}

#[test]
fn test_update_pricing_for_missing_package() {
    let mut store: TestStore = TestStore::new();
    let source: CreatePackageRequest = august_package_request();

    let request: UpdatePackagePricingRequest = UpdatePackagePricingRequest {
        group_size_tiers: source.group_size_tiers,
        duration_options: source.duration_options,
        pricing_matrix: source.pricing_matrix,
    };
    let error: ApiError = update_package_pricing(&mut store, 99, request).unwrap_err();

    assert!(matches!(error, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_completeness_report_lists_gaps() {
    let (mut store, package_id) = store_with_package();
    let source: CreatePackageRequest = august_package_request();

    // Drop every Large Group cell from the revision.
    let mut matrix: Vec<PricingPeriod> = source.pricing_matrix;
    matrix[0].prices.retain(|point| point.tier_index == 0);

    let request: UpdatePackagePricingRequest = UpdatePackagePricingRequest {
        group_size_tiers: source.group_size_tiers,
        duration_options: source.duration_options,
        pricing_matrix: matrix,
    };
    update_package_pricing(&mut store, package_id, request).unwrap();

    let report: GetPackageCompletenessResponse =
        get_package_completeness(&store, package_id).unwrap();

    assert!(!report.is_valid);
    assert_eq!(report.expected_cells, 4);
    assert_eq!(report.missing_cells.len(), 2);
    assert!(
        report
            .missing_cells
            .iter()
            .all(|cell| cell.tier == "Large Group")
    );
}

#[test]
fn test_completeness_of_complete_package() {
    let (store, package_id) = store_with_package();

    let report: GetPackageCompletenessResponse =
        get_package_completeness(&store, package_id).unwrap();

    assert!(report.is_valid);
    assert!(report.missing_cells.is_empty());
    assert_eq!(report.version, 1);
}
