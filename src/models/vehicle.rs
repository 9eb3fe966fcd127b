// src/models/vehicle.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums ---

// Disponibilidade do veículo: é a fonte única de verdade que os ciclos de
// locação e manutenção mutam dentro das transações.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Toyota")]
    pub brand: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = "AB123CD")]
    pub plate: String,
    #[schema(example = 2022)]
    pub year: i32,
    #[schema(example = "50.00")]
    pub price_per_day: Decimal,
    pub thumbnail: Option<String>,
    #[schema(example = 5)]
    pub seats: i32,
    #[schema(example = "automatic")]
    pub transmission: String,
    #[schema(example = "gasoline")]
    pub fuel: String,
    #[schema(example = 35000)]
    pub odometer: i32,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Descritor completo usado nos snapshots de incidente e fatura.
    pub fn descriptor(&self) -> String {
        format!("{} {} - {}", self.brand, self.model, self.plate)
    }

    /// Nome curto usado no snapshot de manutenção e no dashboard.
    pub fn short_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehiclePayload {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "Plate is required"))]
    pub plate: String,
    #[validate(range(min = 1900, message = "Year is out of range"))]
    pub year: i32,
    #[validate(custom(function = "validate_not_negative"))]
    pub price_per_day: Decimal,
    pub thumbnail: Option<String>,
    #[validate(range(min = 1, message = "Seats must be at least 1"))]
    pub seats: i32,
    #[validate(length(min = 1, message = "Transmission is required"))]
    pub transmission: String,
    #[validate(length(min = 1, message = "Fuel is required"))]
    pub fuel: String,
    #[serde(default)]
    pub odometer: i32,
}

// Atualização parcial: só os campos presentes são aplicados.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehiclePayload {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub plate: Option<String>,
    pub year: Option<i32>,
    #[validate(custom(function = "validate_not_negative"))]
    pub price_per_day: Option<Decimal>,
    pub thumbnail: Option<String>,
    pub seats: Option<i32>,
    pub transmission: Option<String>,
    pub fuel: Option<String>,
    pub odometer: Option<i32>,
}

// Campos `Option` pulam a validação quando ausentes, então o mesmo
// validador serve para criação e atualização.

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVehicleStatusPayload {
    pub status: VehicleStatus,
}

// Filtros de listagem (query string)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilters {
    pub status: Option<VehicleStatus>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Value cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            brand: "Toyota".into(),
            model: "Corolla".into(),
            plate: "AB123CD".into(),
            year: 2022,
            price_per_day: Decimal::new(5000, 2),
            thumbnail: None,
            seats: 5,
            transmission: "automatic".into(),
            fuel: "gasoline".into(),
            odometer: 35000,
            status: VehicleStatus::Available,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn descriptor_includes_plate() {
        assert_eq!(sample().descriptor(), "Toyota Corolla - AB123CD");
    }

    #[test]
    fn short_name_has_no_plate() {
        assert_eq!(sample().short_name(), "Toyota Corolla");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&VehicleStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");
        let back: VehicleStatus = serde_json::from_str("\"rented\"").unwrap();
        assert_eq!(back, VehicleStatus::Rented);
    }

    #[test]
    fn negative_price_fails_validation() {
        let payload: CreateVehiclePayload = serde_json::from_value(serde_json::json!({
            "brand": "Toyota",
            "model": "Corolla",
            "plate": "AB123CD",
            "year": 2022,
            "pricePerDay": -10.0,
            "seats": 5,
            "transmission": "automatic",
            "fuel": "gasoline"
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn camel_case_payload_deserializes() {
        let payload: CreateVehiclePayload = serde_json::from_value(serde_json::json!({
            "brand": "Fiat",
            "model": "Cronos",
            "plate": "AC444BB",
            "year": 2023,
            "pricePerDay": 42.5,
            "seats": 5,
            "transmission": "manual",
            "fuel": "diesel",
            "odometer": 1200
        }))
        .unwrap();
        assert_eq!(payload.plate, "AC444BB");
        assert_eq!(payload.odometer, 1200);
        assert!(payload.validate().is_ok());
    }
}
