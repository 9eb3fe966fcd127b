// src/services/incident_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, EmployeeRepository, IncidentRepository, InvoiceRepository, LeaseRepository, VehicleRepository},
    models::incident::{is_locked, IncidentDetail, IncidentFilters},
};

#[derive(Clone)]
pub struct IncidentService {
    repo: IncidentRepository,
    lease_repo: LeaseRepository,
    invoice_repo: InvoiceRepository,
    client_repo: ClientRepository,
    vehicle_repo: VehicleRepository,
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl IncidentService {
    pub fn new(
        repo: IncidentRepository,
        lease_repo: LeaseRepository,
        invoice_repo: InvoiceRepository,
        client_repo: ClientRepository,
        vehicle_repo: VehicleRepository,
        employee_repo: EmployeeRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            lease_repo,
            invoice_repo,
            client_repo,
            vehicle_repo,
            employee_repo,
            pool,
        }
    }

    /// Registra um sinistro contra uma locação, em qualquer estado dela.
    /// Nome do cliente e descrição do veículo são congelados na linha.
    pub async fn create(
        &self,
        lease_id: Uuid,
        employee_id: Option<Uuid>,
        kind: &str,
        description: Option<&str>,
        cost: Option<Decimal>,
    ) -> Result<IncidentDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let lease = self
            .lease_repo
            .find_by_id_tx(&mut *tx, lease_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        if let Some(employee_id) = employee_id {
            if !self.employee_repo.exists(&mut *tx, employee_id).await? {
                return Err(AppError::NotFound("Employee not found".into()));
            }
        }

        let client = self
            .client_repo
            .find_by_id_tx(&mut *tx, lease.client_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;

        let vehicle = self
            .vehicle_repo
            .find_by_id_tx(&mut *tx, lease.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

        let incident = self
            .repo
            .insert(
                &mut *tx,
                lease_id,
                employee_id,
                &client.name,
                &vehicle.descriptor(),
                kind,
                description,
                cost,
                Utc::now().date_naive(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!("⚠️ Sinistro {} registrado na locação {}", incident.id, lease_id);

        self.repo
            .find_detail(incident.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".into()))
    }

    pub async fn list(&self, filters: &IncidentFilters) -> Result<Vec<IncidentDetail>, AppError> {
        self.repo.list(filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<IncidentDetail, AppError> {
        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".into()))
    }

    /// Atualização parcial de descrição e custo. Depois que a locação foi
    /// finalizada e faturada o livro fecha: nada mais muda.
    pub async fn update(
        &self,
        id: Uuid,
        description: Option<&str>,
        cost: Option<Decimal>,
    ) -> Result<IncidentDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let incident = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".into()))?;

        self.check_unlocked(&mut tx, incident.lease_id, "update").await?;

        let new_description = description.or(incident.description.as_deref());
        let new_cost = cost.or(incident.cost);

        self.repo
            .update_fields(&mut *tx, id, new_description, new_cost)
            .await?;

        tx.commit().await?;

        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let incident = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".into()))?;

        self.check_unlocked(&mut tx, incident.lease_id, "delete").await?;

        self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!("⚠️ Sinistro {} removido", id);
        Ok(())
    }

    /// Guard do livro-razão: locação finalizada E faturada trava o sinistro.
    async fn check_unlocked(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        lease_id: Uuid,
        action: &str,
    ) -> Result<(), AppError> {
        let lease = self
            .lease_repo
            .find_by_id_tx(&mut **tx, lease_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        let has_invoice = self.invoice_repo.exists_for_lease(&mut **tx, lease_id).await?;

        if is_locked(lease.state, has_invoice) {
            tracing::warn!("Sinistro travado: locação {} já foi faturada", lease_id);
            return Err(AppError::InvalidState(format!(
                "Cannot {} an incident for an invoiced lease",
                action
            )));
        }
        Ok(())
    }
}
