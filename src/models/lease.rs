// src/models/lease.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// --- Enums ---

// Máquina de estados da locação:
//   created -> confirmed -> finalized
//   created/confirmed -> cancelled
// Toda transição passa por um guard antes de qualquer escrita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lease_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaseState {
    Created,
    Confirmed,
    Cancelled,
    Finalized,
}

impl LeaseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseState::Created => "created",
            LeaseState::Confirmed => "confirmed",
            LeaseState::Cancelled => "cancelled",
            LeaseState::Finalized => "finalized",
        }
    }

    /// Confirmar só é permitido a partir de `created`.
    pub fn can_confirm(&self) -> bool {
        matches!(self, LeaseState::Created)
    }

    /// Cancelar é permitido enquanto a locação não terminou.
    pub fn can_cancel(&self) -> bool {
        matches!(self, LeaseState::Created | LeaseState::Confirmed)
    }

    /// Encerrar só é permitido a partir de `confirmed`.
    pub fn can_finalize(&self) -> bool {
        matches!(self, LeaseState::Confirmed)
    }

    /// Editar campos só é permitido em `created`.
    pub fn is_editable(&self) -> bool {
        matches!(self, LeaseState::Created)
    }

    /// Locações finalizadas são imutáveis e nunca podem ser removidas.
    pub fn is_deletable(&self) -> bool {
        !matches!(self, LeaseState::Finalized)
    }

    /// Em `created`/`confirmed` a locação ainda detém o veículo.
    pub fn holds_vehicle(&self) -> bool {
        matches!(self, LeaseState::Created | LeaseState::Confirmed)
    }
}

impl fmt::Display for LeaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub employee_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    // Sempre calculado (diárias x preço), nunca vem do cliente HTTP.
    #[schema(example = "150.00")]
    pub amount: Decimal,
    pub state: LeaseState,
    pub created_date: NaiveDate,
    pub confirmed_date: Option<NaiveDate>,
    pub cancelled_date: Option<NaiveDate>,
    pub start_odometer: Option<i32>,
    pub end_odometer: Option<i32>,
}

// Projeção desnormalizada devolvida por GET/list: a locação com os nomes
// do cliente, do veículo e do funcionário já juntados.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaseDetail {
    pub id: Uuid,
    pub client_id: Uuid,
    #[schema(example = "Maria García")]
    pub client_name: String,
    pub vehicle_id: Uuid,
    #[schema(example = "Toyota")]
    pub vehicle_brand: String,
    #[schema(example = "Corolla")]
    pub vehicle_model: String,
    #[schema(example = "AB123CD")]
    pub vehicle_plate: String,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub amount: Decimal,
    pub state: LeaseState,
    pub created_date: NaiveDate,
    pub confirmed_date: Option<NaiveDate>,
    pub cancelled_date: Option<NaiveDate>,
    pub start_odometer: Option<i32>,
    pub end_odometer: Option<i32>,
}

// Filtros de listagem (query string)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LeaseFilters {
    pub client_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub state: Option<LeaseState>,
    /// Filtra pela data de criação.
    pub date: Option<NaiveDate>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// --- Regras puras ---

/// Diárias inteiras entre início e fim; frações de dia são truncadas.
pub fn whole_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}

/// Valor da locação: diárias x preço por dia do veículo.
/// Menos de um dia inteiro é entrada inválida.
pub fn rental_amount(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    price_per_day: Decimal,
) -> Result<Decimal, AppError> {
    let days = whole_days(start, end);
    if days <= 0 {
        return Err(AppError::InvalidInput(
            "End date must be after start date".into(),
        ));
    }
    Ok(Decimal::from(days) * price_per_day)
}

/// Regras de odômetro do encerramento: a leitura final não pode ficar abaixo
/// da leitura inicial registrada nem regredir o odômetro do veículo.
pub fn check_final_odometer(
    start_odometer: Option<i32>,
    vehicle_odometer: i32,
    end_odometer: i32,
) -> Result<(), AppError> {
    if let Some(start) = start_odometer {
        if end_odometer < start {
            return Err(AppError::InvalidInput(
                "End odometer cannot be lower than start odometer".into(),
            ));
        }
    }
    if end_odometer < vehicle_odometer {
        return Err(AppError::InvalidInput(
            "End odometer cannot be lower than the vehicle's current odometer".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn amount_is_days_times_price() {
        let amount = rental_amount(
            dt(2024, 1, 15, 10),
            dt(2024, 1, 18, 10),
            Decimal::new(5000, 2),
        )
        .unwrap();
        assert_eq!(amount, Decimal::new(15000, 2)); // 3 dias x 50.00
    }

    #[test]
    fn partial_days_are_truncated() {
        // 2 dias e 12 horas cobram 2 diárias.
        let amount = rental_amount(
            dt(2024, 1, 15, 10),
            dt(2024, 1, 17, 22),
            Decimal::new(5000, 2),
        )
        .unwrap();
        assert_eq!(amount, Decimal::new(10000, 2));
    }

    #[test]
    fn less_than_one_day_is_invalid() {
        let err = rental_amount(
            dt(2024, 1, 15, 10),
            dt(2024, 1, 15, 22),
            Decimal::new(5000, 2),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn inverted_range_is_invalid() {
        let err = rental_amount(
            dt(2024, 1, 18, 10),
            dt(2024, 1, 15, 10),
            Decimal::new(5000, 2),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn transitions_only_move_forward() {
        assert!(LeaseState::Created.can_confirm());
        assert!(!LeaseState::Confirmed.can_confirm());
        assert!(!LeaseState::Cancelled.can_confirm());
        assert!(!LeaseState::Finalized.can_confirm());

        assert!(LeaseState::Confirmed.can_finalize());
        assert!(!LeaseState::Created.can_finalize());
        assert!(!LeaseState::Cancelled.can_finalize());
        assert!(!LeaseState::Finalized.can_finalize());
    }

    #[test]
    fn cancel_allowed_until_terminal_state() {
        assert!(LeaseState::Created.can_cancel());
        assert!(LeaseState::Confirmed.can_cancel());
        assert!(!LeaseState::Cancelled.can_cancel());
        assert!(!LeaseState::Finalized.can_cancel());
    }

    #[test]
    fn finalized_lease_is_immutable() {
        assert!(!LeaseState::Finalized.is_deletable());
        assert!(!LeaseState::Finalized.is_editable());
        assert!(LeaseState::Created.is_deletable());
        assert!(LeaseState::Cancelled.is_deletable());
        assert!(LeaseState::Created.is_editable());
        assert!(!LeaseState::Confirmed.is_editable());
    }

    #[test]
    fn vehicle_hold_follows_active_states() {
        assert!(LeaseState::Created.holds_vehicle());
        assert!(LeaseState::Confirmed.holds_vehicle());
        assert!(!LeaseState::Cancelled.holds_vehicle());
        assert!(!LeaseState::Finalized.holds_vehicle());
    }

    #[test]
    fn end_odometer_cannot_regress() {
        assert!(check_final_odometer(Some(1000), 1000, 1250).is_ok());
        assert!(matches!(
            check_final_odometer(Some(1000), 1000, 900),
            Err(AppError::InvalidInput(_))
        ));
        // Sem leitura inicial, vale o odômetro atual do veículo.
        assert!(check_final_odometer(None, 1200, 1100).is_err());
        assert!(check_final_odometer(None, 1200, 1200).is_ok());
    }

    #[test]
    fn state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LeaseState::Finalized).unwrap(),
            "\"finalized\""
        );
        let back: LeaseState = serde_json::from_str("\"created\"").unwrap();
        assert_eq!(back, LeaseState::Created);
    }
}
