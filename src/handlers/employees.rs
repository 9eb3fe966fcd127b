// src/handlers/employees.rs

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
    models::employee::{CreateEmployeePayload, EmployeeFilters, UpdateEmployeePayload},
};

// POST /api/employees
pub async fn create_employee(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.employee_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

// GET /api/employees
pub async fn list_employees(
    State(app_state): State<AppState>,
    Query(filters): Query<EmployeeFilters>,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state.employee_service.list(&filters).await?;
    Ok(Json(employees))
}

// GET /api/employees/{id}
pub async fn get_employee(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state.employee_service.get(id).await?;
    Ok(Json(employee))
}

// PUT /api/employees/{id}
pub async fn update_employee(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.employee_service.update(id, &payload).await?;
    Ok(Json(employee))
}

// DELETE /api/employees/{id}
pub async fn delete_employee(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.employee_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
