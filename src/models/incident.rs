// src/models/incident.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::lease::LeaseState;

// Registro de dano/infração preso a uma locação. Os nomes do cliente e do
// veículo são snapshots tirados na criação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    pub lease_id: Uuid,
    pub employee_id: Option<Uuid>,
    #[schema(example = "Maria García")]
    pub client_name: String,
    #[schema(example = "Toyota Corolla - AB123CD")]
    pub vehicle_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "scratch")]
    pub kind: String,
    pub description: Option<String>,
    #[schema(example = "25.50")]
    pub cost: Option<Decimal>,
    pub date: NaiveDate,
}

// Projeção de leitura: acrescenta o nome do funcionário e o estado atual
// da locação (o frontend usa o estado para saber se o registro está travado).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetail {
    pub id: Uuid,
    pub lease_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub client_name: String,
    pub vehicle_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: NaiveDate,
    pub employee_name: Option<String>,
    pub lease_state: LeaseState,
}

// Filtros de listagem (query string)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFilters {
    pub lease_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    /// Busca por substring no tipo do incidente.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<NaiveDate>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Travado: a locação foi finalizada e já tem fatura emitida. A partir daí
/// o incidente vira documento contábil e não pode mais ser alterado.
pub fn is_locked(lease_state: LeaseState, lease_has_invoice: bool) -> bool {
    lease_state == LeaseState::Finalized && lease_has_invoice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_only_when_finalized_and_invoiced() {
        assert!(is_locked(LeaseState::Finalized, true));
        assert!(!is_locked(LeaseState::Finalized, false));
        assert!(!is_locked(LeaseState::Confirmed, true));
        assert!(!is_locked(LeaseState::Created, false));
        assert!(!is_locked(LeaseState::Cancelled, true));
    }
}
