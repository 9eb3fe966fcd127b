// src/models/maintenance.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "maintenance_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Started,
    Finished,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Started => "started",
            MaintenanceStatus::Finished => "finished",
        }
    }

    pub fn can_finish(&self) -> bool {
        matches!(self, MaintenanceStatus::Started)
    }

    /// Uma janela aberta ainda detém o veículo em `maintenance`.
    pub fn holds_vehicle(&self) -> bool {
        matches!(self, MaintenanceStatus::Started)
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Structs ---

// Janela de manutenção de um veículo. `vehicle_name` é snapshot da criação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub employee_id: Option<Uuid>,
    #[schema(example = "Toyota Corolla")]
    pub vehicle_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "oil change")]
    pub kind: String,
    pub description: Option<String>,
    #[schema(example = "80.00")]
    pub cost: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: MaintenanceStatus,
}

// Filtros de listagem (query string)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceFilters {
    pub vehicle_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub status: Option<MaintenanceStatus>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finishing_twice_is_blocked() {
        assert!(MaintenanceStatus::Started.can_finish());
        assert!(!MaintenanceStatus::Finished.can_finish());
    }

    #[test]
    fn only_open_window_holds_vehicle() {
        assert!(MaintenanceStatus::Started.holds_vehicle());
        assert!(!MaintenanceStatus::Finished.holds_vehicle());
    }
}
