// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::dashboard::DashboardData};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "KPIs, receita mensal, top veículos e últimas locações faturadas", body = DashboardData)
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let data = app_state.dashboard_service.summary().await?;
    Ok(Json(data))
}
