// src/handlers/vehicles.rs

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
    models::vehicle::{
        CreateVehiclePayload, UpdateVehiclePayload, UpdateVehicleStatusPayload, VehicleFilters,
    },
};

// POST /api/vehicles
pub async fn create_vehicle(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vehicle = app_state.vehicle_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

// GET /api/vehicles
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<impl IntoResponse, AppError> {
    let vehicles = app_state.vehicle_service.list(&filters).await?;
    Ok(Json(vehicles))
}

// GET /api/vehicles/{id}
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = app_state.vehicle_service.get(id).await?;
    Ok(Json(vehicle))
}

// PUT /api/vehicles/{id}
pub async fn update_vehicle(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vehicle = app_state.vehicle_service.update(id, &payload).await?;
    Ok(Json(vehicle))
}

// PATCH /api/vehicles/{id}/status
pub async fn update_vehicle_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehicleStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = app_state
        .vehicle_service
        .set_status(id, payload.status)
        .await?;
    Ok(Json(vehicle))
}

// DELETE /api/vehicles/{id}
pub async fn delete_vehicle(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.vehicle_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
