// src/services/maintenance_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EmployeeRepository, MaintenanceRepository, VehicleRepository},
    models::{
        maintenance::{Maintenance, MaintenanceFilters, MaintenanceStatus},
        vehicle::VehicleStatus,
    },
};

#[derive(Clone)]
pub struct MaintenanceService {
    repo: MaintenanceRepository,
    vehicle_repo: VehicleRepository,
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl MaintenanceService {
    pub fn new(
        repo: MaintenanceRepository,
        vehicle_repo: VehicleRepository,
        employee_repo: EmployeeRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            vehicle_repo,
            employee_repo,
            pool,
        }
    }

    /// Abre uma janela de manutenção e tira o veículo de circulação.
    /// Veículo locado não entra na oficina.
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        employee_id: Option<Uuid>,
        kind: &str,
        description: Option<&str>,
        cost: Option<Decimal>,
    ) -> Result<Maintenance, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle = self
            .vehicle_repo
            .find_by_id_for_update(&mut *tx, vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        if vehicle.status == VehicleStatus::Rented {
            tracing::warn!("Manutenção recusada: veículo {} está locado", vehicle_id);
            return Err(AppError::InvalidState(
                "Vehicle is currently rented".into(),
            ));
        }

        if let Some(employee_id) = employee_id {
            if !self.employee_repo.exists(&mut *tx, employee_id).await? {
                return Err(AppError::NotFound("Employee not found".into()));
            }
        }

        let window = self
            .repo
            .insert(
                &mut *tx,
                vehicle_id,
                employee_id,
                &vehicle.short_name(),
                kind,
                description,
                cost,
                Utc::now(),
            )
            .await?;

        self.vehicle_repo
            .set_status(&mut *tx, vehicle_id, VehicleStatus::Maintenance)
            .await?;

        tx.commit().await?;

        tracing::info!("🔧 Manutenção {} aberta (veículo {})", window.id, vehicle_id);
        Ok(window)
    }

    pub async fn list(&self, filters: &MaintenanceFilters) -> Result<Vec<Maintenance>, AppError> {
        self.repo.list(filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Maintenance, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance record not found".into()))
    }

    /// Encerra a janela e devolve o veículo para 'available'.
    pub async fn finish(&self, id: Uuid) -> Result<Maintenance, AppError> {
        let mut tx = self.pool.begin().await?;

        let window = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance record not found".into()))?;

        if !window.status.can_finish() {
            tracing::warn!("Encerramento recusado: manutenção {} já foi finalizada", id);
            return Err(AppError::InvalidState(
                "Maintenance is already finished".into(),
            ));
        }

        let finished = self.repo.mark_finished(&mut *tx, id, Utc::now()).await?;

        self.vehicle_repo
            .set_status(&mut *tx, window.vehicle_id, VehicleStatus::Available)
            .await?;

        tx.commit().await?;

        tracing::info!("🔧 Manutenção {} encerrada", id);
        Ok(finished)
    }

    /// Exclusão física. Apagar uma manutenção em andamento libera o veículo.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let window = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance record not found".into()))?;

        if window.status == MaintenanceStatus::Started {
            let vehicle = self
                .vehicle_repo
                .find_by_id_for_update(&mut *tx, window.vehicle_id)
                .await?;
            if let Some(vehicle) = vehicle {
                if vehicle.status == VehicleStatus::Maintenance {
                    self.vehicle_repo
                        .set_status(&mut *tx, vehicle.id, VehicleStatus::Available)
                        .await?;
                }
            }
        }

        self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!("🔧 Manutenção {} removida", id);
        Ok(())
    }
}
