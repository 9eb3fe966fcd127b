// src/handlers/clients.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::client::{
        ClientFilters, CreateClientPayload, UpdateClientPayload, UpdateClientStatusPayload,
    },
};

// POST /api/clients
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state.client_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients
pub async fn list_clients(
    State(app_state): State<AppState>,
    Query(filters): Query<ClientFilters>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list(&filters).await?;
    Ok(Json(clients))
}

// GET /api/clients/{id}
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.client_service.get(id).await?;
    Ok(Json(client))
}

// PUT /api/clients/{id}
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state.client_service.update(id, &payload).await?;
    Ok(Json(client))
}

// PATCH /api/clients/{id}/status
pub async fn update_client_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_service
        .set_status(id, payload.status)
        .await?;
    Ok(Json(client))
}

// DELETE /api/clients/{id} (exclusão lógica)
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
