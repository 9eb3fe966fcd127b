// src/handlers/maintenance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        maintenance::{Maintenance, MaintenanceFilters},
        vehicle::validate_not_negative,
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenancePayload {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub vehicle_id: Uuid,

    pub employee_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    #[serde(rename = "type")]
    #[schema(example = "oil change")]
    pub kind: String,

    #[schema(example = "Troca de óleo e filtros")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "80.00")]
    pub cost: Option<Decimal>,
}

// POST /api/maintenance
#[utoipa::path(
    post,
    path = "/api/maintenance",
    tag = "Maintenance",
    request_body = CreateMaintenancePayload,
    responses(
        (status = 201, description = "Janela aberta, veículo passa a 'maintenance'", body = Maintenance),
        (status = 400, description = "Veículo está locado"),
        (status = 404, description = "Veículo ou funcionário não encontrado")
    )
)]
pub async fn create_maintenance(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMaintenancePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let window = app_state
        .maintenance_service
        .create(
            payload.vehicle_id,
            payload.employee_id,
            &payload.kind,
            payload.description.as_deref(),
            payload.cost,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(window)))
}

// GET /api/maintenance
#[utoipa::path(
    get,
    path = "/api/maintenance",
    tag = "Maintenance",
    params(MaintenanceFilters),
    responses(
        (status = 200, description = "Janelas de manutenção", body = [Maintenance])
    )
)]
pub async fn list_maintenance(
    State(app_state): State<AppState>,
    Query(filters): Query<MaintenanceFilters>,
) -> Result<impl IntoResponse, AppError> {
    let windows = app_state.maintenance_service.list(&filters).await?;
    Ok(Json(windows))
}

// GET /api/maintenance/{id}
#[utoipa::path(
    get,
    path = "/api/maintenance/{id}",
    tag = "Maintenance",
    params(("id" = Uuid, Path, description = "ID da manutenção")),
    responses(
        (status = 200, description = "Detalhe da manutenção", body = Maintenance),
        (status = 404, description = "Manutenção não encontrada")
    )
)]
pub async fn get_maintenance(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let window = app_state.maintenance_service.get(id).await?;
    Ok(Json(window))
}

// PATCH /api/maintenance/{id}/finish
#[utoipa::path(
    patch,
    path = "/api/maintenance/{id}/finish",
    tag = "Maintenance",
    params(("id" = Uuid, Path, description = "ID da manutenção")),
    responses(
        (status = 200, description = "Janela encerrada, veículo liberado", body = Maintenance),
        (status = 400, description = "Manutenção já foi finalizada")
    )
)]
pub async fn finish_maintenance(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let window = app_state.maintenance_service.finish(id).await?;
    Ok(Json(window))
}

// DELETE /api/maintenance/{id}
#[utoipa::path(
    delete,
    path = "/api/maintenance/{id}",
    tag = "Maintenance",
    params(("id" = Uuid, Path, description = "ID da manutenção")),
    responses(
        (status = 204, description = "Manutenção removida (libera o veículo se estava aberta)")
    )
)]
pub async fn delete_maintenance(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.maintenance_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
