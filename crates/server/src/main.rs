// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tracing::{error, info};
use trip_quote_api::{
    ApiError, ApplyPriceRequest, ApplyPriceResponse, CreatePackageRequest, CreatePackageResponse,
    CreateQuoteRequest, CreateQuoteResponse, GetPackageCompletenessResponse,
    GetSyncStatusResponse, PackageRepository, PriceCalculation, QuoteRepository,
    RecalculatePriceResponse, RepositoryError, ResetPriceResponse, SetManualPriceRequest,
    SetManualPriceResponse, StoredQuote, UpdatePackagePricingRequest,
    UpdatePackagePricingResponse, UpdateTripParamsRequest, UpdateTripParamsResponse,
    apply_quote_price, create_package, create_quote, get_package_completeness, get_sync_status,
    recalculate_price, reset_quote_price, set_manual_quote_price, update_package_pricing,
    update_trip_params,
};
use trip_quote_audit::{Actor, AuditEvent, Cause};
use trip_quote_domain::{GroupSizeTier, PriceCell, PricePoint, PricingPeriod, SuperPackage};

/// Trip Quote Server - HTTP server for the Trip Quote Pricing System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed a demo package on startup
    #[arg(long, default_value_t = false)]
    seed: bool,
}

/// In-memory store backing the server.
///
/// Packages are stored at their current version only; quotes carry the
/// version they were last priced against, which is all staleness detection
/// needs.
#[derive(Debug, Default)]
struct InMemoryStore {
    packages: HashMap<i64, SuperPackage>,
    quotes: HashMap<i64, StoredQuote>,
    audit_log: Vec<AuditEvent>,
    next_package_id: i64,
    next_quote_id: i64,
}

impl InMemoryStore {
    fn new() -> Self {
        Self {
            next_package_id: 1,
            next_quote_id: 1,
            ..Self::default()
        }
    }

}

impl PackageRepository for InMemoryStore {
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

impl QuoteRepository for InMemoryStore {
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

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The store wrapped in a Mutex to allow safe concurrent access.
    store: Arc<Mutex<InMemoryStore>>,
}

/// API request for creating a quote.
///
/// Includes audit attribution in addition to the quote data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateQuoteApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor (e.g., "admin").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The package to link the quote to.
    package_id: i64,
    /// Party size.
    number_of_people: u32,
    /// Stay length in nights.
    number_of_nights: u32,
    /// Arrival date.
    arrival_date: Date,
}

/// API request for applying a recalculated price.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ApplyPriceApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor (e.g., "admin").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The price to persist. Must match the calculation's total.
    new_price: f64,
    /// The breakdown the price came from.
    price_calculation: PriceCalculation,
}

/// API request for setting a manual price.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetManualPriceApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor (e.g., "admin").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The price to set.
    price: f64,
}

/// API request for resetting a quote to its calculated price.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ResetPriceApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor (e.g., "admin").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// One audit event in a quote's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuditEventResponse {
    /// The actor who initiated the change.
    actor_id: String,
    /// The type of actor.
    actor_type: String,
    /// The cause ID.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The name of the transition performed.
    action_name: String,
    /// Optional details about the transition.
    action_details: Option<String>,
    /// The price state before the transition.
    before_snapshot: String,
    /// The price state after the transition.
    after_snapshot: String,
}

/// API response for a quote's price change history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuoteHistoryResponse {
    /// The canonical quote identifier.
    quote_id: i64,
    /// The events, oldest first.
    events: Vec<AuditEventResponse>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Converts an `AuditEvent` to an `AuditEventResponse`.
fn audit_event_to_response(event: &AuditEvent) -> AuditEventResponse {
    AuditEventResponse {
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    }
}

/// Handler for POST `/packages`.
async fn handle_create_package(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePackageRequest>,
) -> Result<Json<CreatePackageResponse>, HttpError> {
    info!(name = %req.name, "Handling create package request");

    let mut store = app_state.store.lock().await;
    let response: CreatePackageResponse = create_package(&mut *store, req)?;

    Ok(Json(response))
}

/// Handler for PUT `/packages/{package_id}/pricing`.
///
/// Revises a package's pricing data and bumps its version. Linked quotes
/// become out of sync and surface as such on their next status read.
async fn handle_update_package_pricing(
    AxumState(app_state): AxumState<AppState>,
    Path(package_id): Path<i64>,
    Json(req): Json<UpdatePackagePricingRequest>,
) -> Result<Json<UpdatePackagePricingResponse>, HttpError> {
    info!(package_id, "Handling update package pricing request");

    let mut store = app_state.store.lock().await;
    let response: UpdatePackagePricingResponse =
        update_package_pricing(&mut *store, package_id, req)?;

    Ok(Json(response))
}

/// Handler for GET `/packages/{package_id}/completeness`.
async fn handle_get_package_completeness(
    AxumState(app_state): AxumState<AppState>,
    Path(package_id): Path<i64>,
) -> Result<Json<GetPackageCompletenessResponse>, HttpError> {
    let store = app_state.store.lock().await;
    let response: GetPackageCompletenessResponse =
        get_package_completeness(&*store, package_id)?;

    Ok(Json(response))
}

/// Handler for POST `/quotes`.
///
/// Creates a quote linked to a package; the initial price is computed and
/// applied as part of the link. A quote is never created without a price.
async fn handle_create_quote(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateQuoteApiRequest>,
) -> Result<Json<CreateQuoteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        package_id = req.package_id,
        "Handling create quote request"
    );

    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: CreateQuoteRequest = CreateQuoteRequest {
        package_id: req.package_id,
        number_of_people: req.number_of_people,
        number_of_nights: req.number_of_nights,
        arrival_date: req.arrival_date,
    };

    let mut store = app_state.store.lock().await;
    let result = create_quote(&mut *store, request, actor, cause)?;

    Ok(Json(result.response))
}

/// Handler for PUT `/quotes/{quote_id}/trip`.
async fn handle_update_trip_params(
    AxumState(app_state): AxumState<AppState>,
    Path(quote_id): Path<i64>,
    Json(req): Json<UpdateTripParamsRequest>,
) -> Result<Json<UpdateTripParamsResponse>, HttpError> {
    info!(quote_id, "Handling update trip parameters request");

    let mut store = app_state.store.lock().await;
    let response: UpdateTripParamsResponse = update_trip_params(&mut *store, quote_id, req)?;

    Ok(Json(response))
}

/// Handler for POST `/quotes/{quote_id}/recalculate_price`.
///
/// Side-effect-free: nothing is persisted until the client applies.
async fn handle_recalculate_price(
    AxumState(app_state): AxumState<AppState>,
    Path(quote_id): Path<i64>,
) -> Result<Json<RecalculatePriceResponse>, HttpError> {
    info!(quote_id, "Handling recalculate price request");

    let store = app_state.store.lock().await;
    let response: RecalculatePriceResponse = recalculate_price(&*store, quote_id)?;

    Ok(Json(response))
}

/// Handler for PUT `/quotes/{quote_id}/price`.
///
/// Applies a recalculated price; the quote links to the package version
/// that is current at apply time.
async fn handle_apply_price(
    AxumState(app_state): AxumState<AppState>,
    Path(quote_id): Path<i64>,
    Json(req): Json<ApplyPriceApiRequest>,
) -> Result<Json<ApplyPriceResponse>, HttpError> {
    info!(
        quote_id,
        actor_id = %req.actor_id,
        new_price = req.new_price,
        "Handling apply price request"
    );

    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: ApplyPriceRequest = ApplyPriceRequest {
        new_price: req.new_price,
        price_calculation: req.price_calculation,
    };

    let mut store = app_state.store.lock().await;
    let result = apply_quote_price(&mut *store, quote_id, request, actor, cause)?;

    Ok(Json(result.response))
}

/// Handler for PUT `/quotes/{quote_id}/manual_price`.
async fn handle_set_manual_price(
    AxumState(app_state): AxumState<AppState>,
    Path(quote_id): Path<i64>,
    Json(req): Json<SetManualPriceApiRequest>,
) -> Result<Json<SetManualPriceResponse>, HttpError> {
    info!(
        quote_id,
        actor_id = %req.actor_id,
        price = req.price,
        "Handling set manual price request"
    );

    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: SetManualPriceRequest = SetManualPriceRequest { price: req.price };

    let mut store = app_state.store.lock().await;
    let result = set_manual_quote_price(&mut *store, quote_id, request, actor, cause)?;

    Ok(Json(result.response))
}

/// Handler for POST `/quotes/{quote_id}/reset_price`.
async fn handle_reset_price(
    AxumState(app_state): AxumState<AppState>,
    Path(quote_id): Path<i64>,
    Json(req): Json<ResetPriceApiRequest>,
) -> Result<Json<ResetPriceResponse>, HttpError> {
    info!(quote_id, actor_id = %req.actor_id, "Handling reset price request");

    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);

    let mut store = app_state.store.lock().await;
    let result = reset_quote_price(&mut *store, quote_id, actor, cause)?;

    Ok(Json(result.response))
}

/// Handler for GET `/quotes/{quote_id}/sync_status`.
async fn handle_get_sync_status(
    AxumState(app_state): AxumState<AppState>,
    Path(quote_id): Path<i64>,
) -> Result<Json<GetSyncStatusResponse>, HttpError> {
    let store = app_state.store.lock().await;
    let response: GetSyncStatusResponse = get_sync_status(&*store, quote_id)?;

    Ok(Json(response))
}

/// Handler for GET `/quotes/{quote_id}/history`.
async fn handle_get_quote_history(
    AxumState(app_state): AxumState<AppState>,
    Path(quote_id): Path<i64>,
) -> Result<Json<QuoteHistoryResponse>, HttpError> {
    let store = app_state.store.lock().await;
    store.load_quote(quote_id).map_err(ApiError::from)?;

    let events: Vec<AuditEventResponse> = store
        .audit_log
        .iter()
        .filter(|event| event.quote_id == quote_id)
        .map(audit_event_to_response)
        .collect();

    Ok(Json(QuoteHistoryResponse { quote_id, events }))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/packages", post(handle_create_package))
        .route(
            "/packages/{package_id}/pricing",
            put(handle_update_package_pricing),
        )
        .route(
            "/packages/{package_id}/completeness",
            get(handle_get_package_completeness),
        )
        .route("/quotes", post(handle_create_quote))
        .route("/quotes/{quote_id}/trip", put(handle_update_trip_params))
        .route(
            "/quotes/{quote_id}/recalculate_price",
            post(handle_recalculate_price),
        )
        .route("/quotes/{quote_id}/price", put(handle_apply_price))
        .route(
            "/quotes/{quote_id}/manual_price",
            put(handle_set_manual_price),
        )
        .route("/quotes/{quote_id}/reset_price", post(handle_reset_price))
        .route("/quotes/{quote_id}/sync_status", get(handle_get_sync_status))
        .route("/quotes/{quote_id}/history", get(handle_get_quote_history))
        .with_state(app_state)
}

/// Seeds a demo package so the server is usable out of the box.
fn seed_demo_package(store: &mut InMemoryStore) -> Result<(), ApiError> {
    let request: CreatePackageRequest = CreatePackageRequest {
        name: String::from("Algarve Golf Week"),
        currency: String::from("GBP"),
        group_size_tiers: vec![
            GroupSizeTier::new(String::from("Small Group"), 1, 4),
            GroupSizeTier::new(String::from("Large Group"), 5, 10),
        ],
        duration_options: vec![3, 7],
        pricing_matrix: vec![
            PricingPeriod::month(
                String::from("August"),
                vec![
                    PricePoint::new(0, 3, PriceCell::Numeric(500.0)),
                    PricePoint::new(0, 7, PriceCell::Numeric(900.0)),
                    PricePoint::new(1, 3, PriceCell::Numeric(850.0)),
                    PricePoint::new(1, 7, PriceCell::Numeric(1500.0)),
                ],
            ),
            PricingPeriod::special(
                String::from("New Year Week"),
                time::macros::date!(2026 - 12 - 28),
                time::macros::date!(2027 - 01 - 03),
                vec![
                    PricePoint::new(0, 3, PriceCell::Numeric(950.0)),
                    PricePoint::new(0, 7, PriceCell::Numeric(1600.0)),
                    PricePoint::new(1, 3, PriceCell::OnRequest),
                    PricePoint::new(1, 7, PriceCell::OnRequest),
                ],
            ),
        ],
    };

    let response: CreatePackageResponse = create_package(store, request)?;
    info!(package_id = response.package_id, "Seeded demo package");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Trip Quote Server");

    let mut store: InMemoryStore = InMemoryStore::new();
    if args.seed {
        seed_demo_package(&mut store)?;
    }

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
