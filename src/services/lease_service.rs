// src/services/lease_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, EmployeeRepository, LeaseRepository, VehicleRepository},
    models::{
        client::ClientStatus,
        lease::{check_final_odometer, rental_amount, LeaseDetail, LeaseFilters},
        vehicle::VehicleStatus,
    },
};

#[derive(Clone)]
pub struct LeaseService {
    repo: LeaseRepository,
    vehicle_repo: VehicleRepository,
    client_repo: ClientRepository,
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl LeaseService {
    pub fn new(
        repo: LeaseRepository,
        vehicle_repo: VehicleRepository,
        client_repo: ClientRepository,
        employee_repo: EmployeeRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            vehicle_repo,
            client_repo,
            employee_repo,
            pool,
        }
    }

    // --- Criação ---
    //
    // Os guards rodam todos antes de qualquer escrita, com o veículo travado
    // (FOR UPDATE) para que duas requisições não aluguem o mesmo carro.

    pub async fn create(
        &self,
        client_id: Uuid,
        vehicle_id: Uuid,
        employee_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        start_odometer: Option<i32>,
    ) -> Result<LeaseDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Veículo existe e está disponível
        let vehicle = self
            .vehicle_repo
            .find_by_id_for_update(&mut *tx, vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        if vehicle.status != VehicleStatus::Available {
            tracing::warn!("Locação recusada: veículo {} está '{}'", vehicle_id, vehicle.status);
            return Err(AppError::InvalidState("Vehicle is not available".into()));
        }

        // 2. Cliente existe e está ativo
        let client = self
            .client_repo
            .find_by_id_tx(&mut *tx, client_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;

        if client.status != ClientStatus::Active {
            return Err(AppError::InvalidState("Client is not active".into()));
        }

        // 3. Funcionário existe
        if !self.employee_repo.exists(&mut *tx, employee_id).await? {
            return Err(AppError::NotFound("Employee not found".into()));
        }

        // 4. O valor é calculado aqui, nunca vem do payload
        let amount = rental_amount(start_time, end_time, vehicle.price_per_day)?;

        let lease = self
            .repo
            .insert(
                &mut *tx,
                client_id,
                vehicle_id,
                employee_id,
                start_time,
                end_time,
                amount,
                Utc::now().date_naive(),
                start_odometer,
            )
            .await?;

        // 5. O veículo sai de circulação junto, na mesma transação
        self.vehicle_repo
            .set_status(&mut *tx, vehicle_id, VehicleStatus::Rented)
            .await?;

        tx.commit().await?;

        tracing::info!("📄 Locação {} criada (veículo {})", lease.id, vehicle_id);

        self.repo
            .find_detail(lease.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))
    }

    // --- Leitura ---

    pub async fn list(&self, filters: &LeaseFilters) -> Result<Vec<LeaseDetail>, AppError> {
        self.repo.list(filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<LeaseDetail, AppError> {
        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))
    }

    // --- Edição ---

    /// Só uma locação recém-criada pode ser editada. Mudou o período,
    /// o valor é recalculado com o preço atual do veículo.
    pub async fn update(
        &self,
        id: Uuid,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        start_odometer: Option<i32>,
    ) -> Result<LeaseDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let lease = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        if !lease.state.is_editable() {
            return Err(AppError::InvalidState(
                "Only a newly created lease can be updated".into(),
            ));
        }

        let vehicle = self
            .vehicle_repo
            .find_by_id_tx(&mut *tx, lease.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        // Merge parcial: campo ausente mantém o valor atual
        let new_start = start_time.unwrap_or(lease.start_time);
        let new_end = end_time.unwrap_or(lease.end_time);
        let new_odometer = start_odometer.or(lease.start_odometer);

        let amount = rental_amount(new_start, new_end, vehicle.price_per_day)?;

        self.repo
            .update_fields(&mut *tx, id, new_start, new_end, new_odometer, amount)
            .await?;

        tx.commit().await?;

        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))
    }

    // --- Transições de estado ---
    //
    // Uma função transacional por transição. O padrão é sempre o mesmo:
    // trava a locação, valida o estado de origem, grava locação e veículo
    // juntos, commita.

    pub async fn confirm(&self, id: Uuid) -> Result<LeaseDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let lease = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        if !lease.state.can_confirm() {
            tracing::warn!("Confirmação recusada: locação {} está '{}'", id, lease.state);
            return Err(AppError::InvalidState(
                "Only a created lease can be confirmed".into(),
            ));
        }

        self.repo
            .mark_confirmed(&mut *tx, id, Utc::now().date_naive())
            .await?;

        // Reafirma a posse do veículo
        self.vehicle_repo
            .set_status(&mut *tx, lease.vehicle_id, VehicleStatus::Rented)
            .await?;

        tx.commit().await?;

        tracing::info!("📄 Locação {} confirmada", id);

        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))
    }

    pub async fn cancel(&self, id: Uuid) -> Result<LeaseDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let lease = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        if !lease.state.can_cancel() {
            tracing::warn!("Cancelamento recusado: locação {} está '{}'", id, lease.state);
            return Err(AppError::InvalidState(format!(
                "A {} lease cannot be cancelled",
                lease.state
            )));
        }

        self.repo
            .mark_cancelled(&mut *tx, id, Utc::now().date_naive())
            .await?;

        // Cancelou, o veículo volta para a vitrine
        self.vehicle_repo
            .set_status(&mut *tx, lease.vehicle_id, VehicleStatus::Available)
            .await?;

        tx.commit().await?;

        tracing::info!("📄 Locação {} cancelada", id);

        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))
    }

    pub async fn finalize(&self, id: Uuid, end_odometer: i32) -> Result<LeaseDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let lease = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        if !lease.state.can_finalize() {
            tracing::warn!("Finalização recusada: locação {} está '{}'", id, lease.state);
            return Err(AppError::InvalidState(
                "Only a confirmed lease can be finalized".into(),
            ));
        }

        let vehicle = self
            .vehicle_repo
            .find_by_id_for_update(&mut *tx, lease.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        // O odômetro não anda para trás
        check_final_odometer(lease.start_odometer, vehicle.odometer, end_odometer)?;

        self.repo.mark_finalized(&mut *tx, id, end_odometer).await?;

        // Devolve o veículo com a leitura final gravada
        self.vehicle_repo
            .set_status_and_odometer(&mut *tx, lease.vehicle_id, VehicleStatus::Available, end_odometer)
            .await?;

        tx.commit().await?;

        tracing::info!("📄 Locação {} finalizada (odômetro {})", id, end_odometer);

        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))
    }

    // --- Exclusão ---

    /// Locação finalizada é histórico e não sai mais. Apagar uma locação que
    /// ainda segura o veículo devolve o veículo para 'available'.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let lease = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        if !lease.state.is_deletable() {
            return Err(AppError::InvalidState(
                "A finalized lease cannot be deleted".into(),
            ));
        }

        if lease.state.holds_vehicle() {
            let vehicle = self
                .vehicle_repo
                .find_by_id_for_update(&mut *tx, lease.vehicle_id)
                .await?;
            if let Some(vehicle) = vehicle {
                if vehicle.status == VehicleStatus::Rented {
                    self.vehicle_repo
                        .set_status(&mut *tx, vehicle.id, VehicleStatus::Available)
                        .await?;
                }
            }
        }

        self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!("📄 Locação {} removida", id);
        Ok(())
    }
}
