// src/handlers/invoices.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::invoice::{Invoice, InvoiceDetail, InvoiceFilters},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub lease_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "credit card")]
    pub payment_method: String,
}

// POST /api/invoices
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura emitida com o total congelado", body = Invoice),
        (status = 400, description = "Locação ainda não foi finalizada"),
        (status = 404, description = "Locação não encontrada"),
        (status = 409, description = "Locação já tem fatura")
    )
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state
        .invoice_service
        .create(payload.lease_id, &payload.payment_method)
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Invoices",
    params(InvoiceFilters),
    responses(
        (status = 200, description = "Faturas com detalhamento de locação e sinistros", body = [InvoiceDetail])
    )
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    Query(filters): Query<InvoiceFilters>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.invoice_service.list(&filters).await?;
    Ok(Json(invoices))
}

// GET /api/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Detalhe da fatura", body = InvoiceDetail),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_service.get(id).await?;
    Ok(Json(invoice))
}

// PATCH /api/invoices/{id}/pay
#[utoipa::path(
    patch,
    path = "/api/invoices/{id}/pay",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura paga", body = Invoice),
        (status = 400, description = "Só fatura pendente pode ser paga")
    )
)]
pub async fn pay_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_service.pay(id).await?;
    Ok(Json(invoice))
}

// PATCH /api/invoices/{id}/void
#[utoipa::path(
    patch,
    path = "/api/invoices/{id}/void",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura anulada", body = Invoice),
        (status = 400, description = "Só fatura pendente pode ser anulada")
    )
)]
pub async fn void_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_service.void(id).await?;
    Ok(Json(invoice))
}
