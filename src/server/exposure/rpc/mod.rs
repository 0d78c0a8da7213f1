//! Remote-procedure exposure
//!
//! One route per procedure under `/rpc/<name>`. Queries are `GET` with their
//! input in the query string; mutations are `POST` with a JSON body.
//!
//! | Procedure       | Route                      |
//! |-----------------|----------------------------|
//! | createInvoice   | `POST /rpc/createInvoice`  |
//! | getInvoices     | `GET /rpc/getInvoices`     |
//! | getInvoice      | `GET /rpc/getInvoice?id=N` |
//! | updateInvoice   | `POST /rpc/updateInvoice`  |
//! | deleteInvoice   | `POST /rpc/deleteInvoice`  |

use crate::core::error::TrackerResult;
use crate::core::invoice::{
    CreateInvoiceInput, DeleteInvoiceOutput, Invoice, InvoiceIdInput, UpdateInvoiceRequest,
};
use crate::core::validation::{Validated, ValidatedQuery};
use crate::server::host::ServerHost;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use std::sync::Arc;

pub const CREATE_INVOICE: &str = "/rpc/createInvoice";
pub const GET_INVOICES: &str = "/rpc/getInvoices";
pub const GET_INVOICE: &str = "/rpc/getInvoice";
pub const UPDATE_INVOICE: &str = "/rpc/updateInvoice";
pub const DELETE_INVOICE: &str = "/rpc/deleteInvoice";

/// Procedure router builder
pub struct RpcExposure;

impl RpcExposure {
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        Router::new()
            .route(CREATE_INVOICE, post(create_invoice))
            .route(GET_INVOICES, get(get_invoices))
            .route(GET_INVOICE, get(get_invoice))
            .route(UPDATE_INVOICE, post(update_invoice))
            .route(DELETE_INVOICE, post(delete_invoice))
            .with_state(host)
    }
}

async fn create_invoice(
    State(host): State<Arc<ServerHost>>,
    Validated(input): Validated<CreateInvoiceInput>,
) -> TrackerResult<Json<Invoice>> {
    let invoice = host.service.create(input).await?;
    Ok(Json(invoice))
}

async fn get_invoices(State(host): State<Arc<ServerHost>>) -> TrackerResult<Json<Vec<Invoice>>> {
    let invoices = host.service.get_all().await?;
    Ok(Json(invoices))
}

async fn get_invoice(
    State(host): State<Arc<ServerHost>>,
    ValidatedQuery(input): ValidatedQuery<InvoiceIdInput>,
) -> TrackerResult<Json<Invoice>> {
    let invoice = host.service.get_one(input.id).await?;
    Ok(Json(invoice))
}

async fn update_invoice(
    State(host): State<Arc<ServerHost>>,
    Validated(request): Validated<UpdateInvoiceRequest>,
) -> TrackerResult<Json<Invoice>> {
    let invoice = host.service.update(request.id, request.changes).await?;
    Ok(Json(invoice))
}

async fn delete_invoice(
    State(host): State<Arc<ServerHost>>,
    Validated(input): Validated<InvoiceIdInput>,
) -> TrackerResult<Json<DeleteInvoiceOutput>> {
    let output = host.service.delete(input.id).await?;
    Ok(Json(output))
}
