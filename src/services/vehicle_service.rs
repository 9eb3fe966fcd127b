// src/services/vehicle_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::VehicleRepository,
    models::vehicle::{
        CreateVehiclePayload, UpdateVehiclePayload, Vehicle, VehicleFilters, VehicleStatus,
    },
};

#[derive(Clone)]
pub struct VehicleService {
    repo: VehicleRepository,
    pool: PgPool,
}

impl VehicleService {
    pub fn new(repo: VehicleRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create(&self, payload: &CreateVehiclePayload) -> Result<Vehicle, AppError> {
        let vehicle = self.repo.insert(&self.pool, payload).await?;
        tracing::info!("🚗 Veículo {} cadastrado ({})", vehicle.id, vehicle.plate);
        Ok(vehicle)
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        self.repo.list(filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))
    }

    /// Atualização parcial: só os campos presentes no payload são aplicados.
    /// O odômetro nunca anda para trás.
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut vehicle = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        if let Some(odometer) = payload.odometer {
            if odometer < vehicle.odometer {
                return Err(AppError::InvalidInput(
                    "Odometer cannot be lower than the current reading".into(),
                ));
            }
            vehicle.odometer = odometer;
        }
        if let Some(brand) = &payload.brand {
            vehicle.brand = brand.clone();
        }
        if let Some(model) = &payload.model {
            vehicle.model = model.clone();
        }
        if let Some(plate) = &payload.plate {
            vehicle.plate = plate.clone();
        }
        if let Some(year) = payload.year {
            vehicle.year = year;
        }
        if let Some(price_per_day) = payload.price_per_day {
            vehicle.price_per_day = price_per_day;
        }
        if let Some(thumbnail) = &payload.thumbnail {
            vehicle.thumbnail = Some(thumbnail.clone());
        }
        if let Some(seats) = payload.seats {
            vehicle.seats = seats;
        }
        if let Some(transmission) = &payload.transmission {
            vehicle.transmission = transmission.clone();
        }
        if let Some(fuel) = &payload.fuel {
            vehicle.fuel = fuel.clone();
        }

        let updated = self.repo.update(&mut *tx, &vehicle).await?;
        tx.commit().await?;

        Ok(updated)
    }

    pub async fn set_status(&self, id: Uuid, status: VehicleStatus) -> Result<Vehicle, AppError> {
        let mut tx = self.pool.begin().await?;

        self.repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        let updated = self.repo.set_status(&mut *tx, id, status).await?;
        tx.commit().await?;

        tracing::info!("🚗 Veículo {} agora está '{}'", id, status);
        Ok(updated)
    }

    /// Exclusão física. Um veículo locado não pode sair da frota.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        if vehicle.status == VehicleStatus::Rented {
            return Err(AppError::InvalidState(
                "Vehicle is currently rented and cannot be deleted".into(),
            ));
        }

        self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(())
    }
}
