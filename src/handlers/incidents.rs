// src/handlers/incidents.rs

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
        incident::{IncidentDetail, IncidentFilters},
        vehicle::validate_not_negative,
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentPayload {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub lease_id: Uuid,

    pub employee_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    #[serde(rename = "type")]
    #[schema(example = "scratch")]
    pub kind: String,

    #[schema(example = "Arranhão na porta traseira direita")]
    pub description: Option<String>,

    // Custo ausente conta como zero na fatura
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "120.00")]
    pub cost: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncidentPayload {
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub cost: Option<Decimal>,
}

// POST /api/incidents
#[utoipa::path(
    post,
    path = "/api/incidents",
    tag = "Incidents",
    request_body = CreateIncidentPayload,
    responses(
        (status = 201, description = "Sinistro registrado com os snapshots de nome", body = IncidentDetail),
        (status = 404, description = "Locação ou funcionário não encontrado")
    )
)]
pub async fn create_incident(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateIncidentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let incident = app_state
        .incident_service
        .create(
            payload.lease_id,
            payload.employee_id,
            &payload.kind,
            payload.description.as_deref(),
            payload.cost,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(incident)))
}

// GET /api/incidents
#[utoipa::path(
    get,
    path = "/api/incidents",
    tag = "Incidents",
    params(IncidentFilters),
    responses(
        (status = 200, description = "Sinistros com funcionário e estado da locação", body = [IncidentDetail])
    )
)]
pub async fn list_incidents(
    State(app_state): State<AppState>,
    Query(filters): Query<IncidentFilters>,
) -> Result<impl IntoResponse, AppError> {
    let incidents = app_state.incident_service.list(&filters).await?;
    Ok(Json(incidents))
}

// GET /api/incidents/{id}
#[utoipa::path(
    get,
    path = "/api/incidents/{id}",
    tag = "Incidents",
    params(("id" = Uuid, Path, description = "ID do sinistro")),
    responses(
        (status = 200, description = "Detalhe do sinistro", body = IncidentDetail),
        (status = 404, description = "Sinistro não encontrado")
    )
)]
pub async fn get_incident(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let incident = app_state.incident_service.get(id).await?;
    Ok(Json(incident))
}

// PUT /api/incidents/{id}
#[utoipa::path(
    put,
    path = "/api/incidents/{id}",
    tag = "Incidents",
    request_body = UpdateIncidentPayload,
    params(("id" = Uuid, Path, description = "ID do sinistro")),
    responses(
        (status = 200, description = "Sinistro editado", body = IncidentDetail),
        (status = 400, description = "Locação já finalizada e faturada (travado)")
    )
)]
pub async fn update_incident(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateIncidentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let incident = app_state
        .incident_service
        .update(id, payload.description.as_deref(), payload.cost)
        .await?;
    Ok(Json(incident))
}

// DELETE /api/incidents/{id}
#[utoipa::path(
    delete,
    path = "/api/incidents/{id}",
    tag = "Incidents",
    params(("id" = Uuid, Path, description = "ID do sinistro")),
    responses(
        (status = 204, description = "Sinistro removido"),
        (status = 400, description = "Locação já finalizada e faturada (travado)")
    )
)]
pub async fn delete_incident(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.incident_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
