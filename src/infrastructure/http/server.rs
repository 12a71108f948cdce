//! HTTP API Server
//!
//! Thin axum surface for operator tooling: request bodies translate to
//! commands and queries, errors come back as RFC 7807 problem documents.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::di::AppState;
use crate::domain::ports::RepositoryError;
use crate::usecases::command::{create_courier, create_order};
use crate::usecases::query::{get_couriers, get_orders};

use super::problem::Problem;

/// Street and volume used by the operator-tooling order stub
const STUB_STREET: &str = "Baker Street";
const STUB_VOLUME: i32 = 5;

/// Request body for POST /couriers
#[derive(Debug, Deserialize)]
pub struct NewCourierRequest {
    pub name: String,
    pub speed: i32,
}

/// Location fragment of the read models
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub x: i32,
    pub y: i32,
}

/// One courier of GET /couriers
#[derive(Debug, Serialize)]
pub struct CourierResponse {
    pub id: Uuid,
    pub name: String,
    pub location: LocationResponse,
}

/// One order of GET /orders
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub location: LocationResponse,
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/couriers", post(create_courier_handler).get(get_couriers_handler))
        .route("/orders", post(create_order_handler).get(get_orders_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serve the API until the shutdown signal fires.
pub async fn start_server(
    addr: &str,
    state: Arc<AppState>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
}

/// POST /couriers
async fn create_courier_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCourierRequest>,
) -> Response {
    let command = match create_courier::Command::new(&body.name, body.speed) {
        Ok(command) => command,
        Err(e) => return Problem::bad_request(e.to_string()).into_response(),
    };

    match state.create_courier_handler.handle(command).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => create_courier_problem(e).into_response(),
    }
}

/// POST /orders - fabricates a fresh order for operator tooling
async fn create_order_handler(State(state): State<Arc<AppState>>) -> Response {
    let command = match create_order::Command::new(Uuid::new_v4(), STUB_STREET, STUB_VOLUME) {
        Ok(command) => command,
        Err(e) => return Problem::bad_request(e.to_string()).into_response(),
    };

    match state.create_order_handler.handle(command).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => create_order_problem(e).into_response(),
    }
}

/// GET /couriers
async fn get_couriers_handler(State(state): State<Arc<AppState>>) -> Response {
    match state
        .get_couriers_handler
        .handle(get_couriers::Query::new())
        .await
    {
        Ok(response) => {
            let couriers: Vec<CourierResponse> = response
                .couriers
                .into_iter()
                .map(|c| CourierResponse {
                    id: c.id,
                    name: c.name,
                    location: LocationResponse {
                        x: c.location_x,
                        y: c.location_y,
                    },
                })
                .collect();
            Json(couriers).into_response()
        }
        Err(e) => Problem::internal(e.to_string()).into_response(),
    }
}

/// GET /orders
async fn get_orders_handler(State(state): State<Arc<AppState>>) -> Response {
    match state
        .get_orders_handler
        .handle(get_orders::Query::new())
        .await
    {
        Ok(response) => {
            let orders: Vec<OrderResponse> = response
                .orders
                .into_iter()
                .map(|o| OrderResponse {
                    id: o.id,
                    location: LocationResponse {
                        x: o.location_x,
                        y: o.location_y,
                    },
                })
                .collect();
            Json(orders).into_response()
        }
        Err(e) => Problem::internal(e.to_string()).into_response(),
    }
}

fn repository_problem(e: RepositoryError) -> Problem {
    match e {
        RepositoryError::NotFound(_, _) => Problem::not_found(e.to_string()),
        RepositoryError::Conflict(_, _) => Problem::conflict(e.to_string()),
        _ => Problem::internal(e.to_string()),
    }
}

fn create_courier_problem(e: create_courier::CreateCourierError) -> Problem {
    match e {
        create_courier::CreateCourierError::Domain(e) => Problem::conflict(e.to_string()),
        create_courier::CreateCourierError::Repository(e) => repository_problem(e),
    }
}

fn create_order_problem(e: create_order::CreateOrderError) -> Problem {
    match e {
        create_order::CreateOrderError::Domain(e) => Problem::conflict(e.to_string()),
        create_order::CreateOrderError::Geo(e) => Problem::internal(e.to_string()),
        create_order::CreateOrderError::Repository(e) => repository_problem(e),
    }
}
