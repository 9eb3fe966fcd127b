// src/handlers/leases.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::lease::{LeaseDetail, LeaseFilters},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeasePayload {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub client_id: Uuid,

    pub vehicle_id: Uuid,

    pub employee_id: Uuid,

    #[schema(example = "2024-01-15T10:00:00Z")]
    pub start_time: DateTime<Utc>,

    #[schema(example = "2024-01-18T10:00:00Z")]
    pub end_time: DateTime<Utc>,

    // Leitura do odômetro na retirada, se alguém anotou
    #[validate(range(min = 0))]
    #[schema(example = 42000)]
    pub start_odometer: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeasePayload {
    pub start_time: Option<DateTime<Utc>>,

    pub end_time: Option<DateTime<Utc>>,

    #[validate(range(min = 0))]
    pub start_odometer: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeLeasePayload {
    #[validate(range(min = 0))]
    #[schema(example = 42350)]
    pub end_odometer: i32,
}

// POST /api/leases
#[utoipa::path(
    post,
    path = "/api/leases",
    tag = "Leases",
    request_body = CreateLeasePayload,
    responses(
        (status = 201, description = "Locação criada, veículo passa a 'rented'", body = LeaseDetail),
        (status = 400, description = "Período inválido ou veículo/cliente fora de estado"),
        (status = 404, description = "Cliente, veículo ou funcionário não encontrado")
    )
)]
pub async fn create_lease(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLeasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lease = app_state
        .lease_service
        .create(
            payload.client_id,
            payload.vehicle_id,
            payload.employee_id,
            payload.start_time,
            payload.end_time,
            payload.start_odometer,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lease)))
}

// GET /api/leases
#[utoipa::path(
    get,
    path = "/api/leases",
    tag = "Leases",
    params(LeaseFilters),
    responses(
        (status = 200, description = "Lista de locações com nomes juntados", body = [LeaseDetail])
    )
)]
pub async fn list_leases(
    State(app_state): State<AppState>,
    Query(filters): Query<LeaseFilters>,
) -> Result<impl IntoResponse, AppError> {
    let leases = app_state.lease_service.list(&filters).await?;
    Ok(Json(leases))
}

// GET /api/leases/{id}
#[utoipa::path(
    get,
    path = "/api/leases/{id}",
    tag = "Leases",
    params(("id" = Uuid, Path, description = "ID da locação")),
    responses(
        (status = 200, description = "Detalhe da locação", body = LeaseDetail),
        (status = 404, description = "Locação não encontrada")
    )
)]
pub async fn get_lease(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lease = app_state.lease_service.get(id).await?;
    Ok(Json(lease))
}

// PUT /api/leases/{id}
#[utoipa::path(
    put,
    path = "/api/leases/{id}",
    tag = "Leases",
    request_body = UpdateLeasePayload,
    params(("id" = Uuid, Path, description = "ID da locação")),
    responses(
        (status = 200, description = "Locação editada, valor recalculado", body = LeaseDetail),
        (status = 400, description = "Locação não está mais em 'created'")
    )
)]
pub async fn update_lease(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lease = app_state
        .lease_service
        .update(id, payload.start_time, payload.end_time, payload.start_odometer)
        .await?;
    Ok(Json(lease))
}

// PATCH /api/leases/{id}/confirm
#[utoipa::path(
    patch,
    path = "/api/leases/{id}/confirm",
    tag = "Leases",
    params(("id" = Uuid, Path, description = "ID da locação")),
    responses(
        (status = 200, description = "Locação confirmada", body = LeaseDetail),
        (status = 400, description = "Só locação em 'created' pode ser confirmada")
    )
)]
pub async fn confirm_lease(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lease = app_state.lease_service.confirm(id).await?;
    Ok(Json(lease))
}

// PATCH /api/leases/{id}/cancel
#[utoipa::path(
    patch,
    path = "/api/leases/{id}/cancel",
    tag = "Leases",
    params(("id" = Uuid, Path, description = "ID da locação")),
    responses(
        (status = 200, description = "Locação cancelada, veículo liberado", body = LeaseDetail),
        (status = 400, description = "Locação finalizada ou já cancelada")
    )
)]
pub async fn cancel_lease(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lease = app_state.lease_service.cancel(id).await?;
    Ok(Json(lease))
}

// PATCH /api/leases/{id}/finalize
#[utoipa::path(
    patch,
    path = "/api/leases/{id}/finalize",
    tag = "Leases",
    request_body = FinalizeLeasePayload,
    params(("id" = Uuid, Path, description = "ID da locação")),
    responses(
        (status = 200, description = "Locação finalizada, veículo devolvido", body = LeaseDetail),
        (status = 400, description = "Estado de origem errado ou regressão de odômetro")
    )
)]
pub async fn finalize_lease(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FinalizeLeasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lease = app_state
        .lease_service
        .finalize(id, payload.end_odometer)
        .await?;
    Ok(Json(lease))
}

// DELETE /api/leases/{id}
#[utoipa::path(
    delete,
    path = "/api/leases/{id}",
    tag = "Leases",
    params(("id" = Uuid, Path, description = "ID da locação")),
    responses(
        (status = 204, description = "Locação removida"),
        (status = 400, description = "Locação finalizada não pode ser removida")
    )
)]
pub async fn delete_lease(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.lease_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
