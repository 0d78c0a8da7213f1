//! REST exposure over the invoice operations
//!
//! - `GET /invoices`, `POST /invoices`
//! - `GET /invoices/{id}`, `PATCH /invoices/{id}`, `DELETE /invoices/{id}`
//! - `GET /health`, `GET /healthz`

use crate::core::error::{TrackerError, TrackerResult};
use crate::core::invoice::{CreateInvoiceInput, DeleteInvoiceOutput, Invoice, UpdateInvoiceInput};
use crate::core::validation::Validated;
use crate::server::host::ServerHost;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST router builder
pub struct RestExposure;

impl RestExposure {
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        Self::health_routes().merge(Self::invoice_routes(host))
    }

    fn invoice_routes(host: Arc<ServerHost>) -> Router {
        Router::new()
            .route("/invoices", get(list_invoices).post(create_invoice))
            .route(
                "/invoices/{id}",
                get(get_invoice).patch(update_invoice).delete(delete_invoice),
            )
            .with_state(host)
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "invoice-tracker"
        }))
    }
}

fn invoice_id(path: Result<Path<i64>, PathRejection>) -> TrackerResult<i64> {
    let Path(id) = path.map_err(TrackerError::from)?;
    Ok(id)
}

async fn list_invoices(State(host): State<Arc<ServerHost>>) -> TrackerResult<Json<Vec<Invoice>>> {
    Ok(Json(host.service.get_all().await?))
}

async fn create_invoice(
    State(host): State<Arc<ServerHost>>,
    Validated(input): Validated<CreateInvoiceInput>,
) -> TrackerResult<(StatusCode, Json<Invoice>)> {
    let invoice = host.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn get_invoice(
    State(host): State<Arc<ServerHost>>,
    path: Result<Path<i64>, PathRejection>,
) -> TrackerResult<Json<Invoice>> {
    let id = invoice_id(path)?;
    Ok(Json(host.service.get_one(id).await?))
}

async fn update_invoice(
    State(host): State<Arc<ServerHost>>,
    path: Result<Path<i64>, PathRejection>,
    Validated(changes): Validated<UpdateInvoiceInput>,
) -> TrackerResult<Json<Invoice>> {
    let id = invoice_id(path)?;
    Ok(Json(host.service.update(id, changes).await?))
}

async fn delete_invoice(
    State(host): State<Arc<ServerHost>>,
    path: Result<Path<i64>, PathRejection>,
) -> TrackerResult<Json<DeleteInvoiceOutput>> {
    let id = invoice_id(path)?;
    Ok(Json(host.service.delete(id).await?))
}
