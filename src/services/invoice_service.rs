// src/services/invoice_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, IncidentRepository, InvoiceRepository, LeaseRepository},
    models::{
        invoice::{
            format_lease_dates, invoice_total, Invoice, InvoiceBillingRow, InvoiceDetail,
            InvoiceFilters, InvoiceStatus,
        },
        lease::LeaseState,
    },
};

#[derive(Clone)]
pub struct InvoiceService {
    repo: InvoiceRepository,
    lease_repo: LeaseRepository,
    client_repo: ClientRepository,
    incident_repo: IncidentRepository,
    pool: PgPool,
}

impl InvoiceService {
    pub fn new(
        repo: InvoiceRepository,
        lease_repo: LeaseRepository,
        client_repo: ClientRepository,
        incident_repo: IncidentRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            lease_repo,
            client_repo,
            incident_repo,
            pool,
        }
    }

    /// Emite a fatura de uma locação finalizada. O total congela aqui:
    /// valor da locação + custos de sinistro até este momento. Edições de
    /// sinistro depois da emissão não mexem mais no total.
    pub async fn create(&self, lease_id: Uuid, payment_method: &str) -> Result<Invoice, AppError> {
        let mut tx = self.pool.begin().await?;

        let lease = self
            .lease_repo
            .find_by_id_for_update(&mut *tx, lease_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lease not found".into()))?;

        // Uma fatura por locação; a UNIQUE no banco segura a corrida.
        if self.repo.exists_for_lease(&mut *tx, lease_id).await? {
            return Err(AppError::Conflict("Lease already has an invoice".into()));
        }

        if lease.state != LeaseState::Finalized {
            tracing::warn!("Fatura recusada: locação {} está '{}'", lease_id, lease.state);
            return Err(AppError::InvalidState(
                "Only a finalized lease can be invoiced".into(),
            ));
        }

        let costs = self
            .incident_repo
            .list_costs_by_lease(&mut *tx, lease_id)
            .await?;
        let total = invoice_total(lease.amount, costs);

        let client = self
            .client_repo
            .find_by_id_tx(&mut *tx, lease.client_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;

        let invoice = self
            .repo
            .insert(
                &mut *tx,
                lease_id,
                &client.name,
                Utc::now().date_naive(),
                total,
                payment_method,
            )
            .await?;

        tx.commit().await?;

        tracing::info!("🧾 Fatura {} emitida (total {})", invoice.id, invoice.total);
        Ok(invoice)
    }

    pub async fn pay(&self, id: Uuid) -> Result<Invoice, AppError> {
        let mut tx = self.pool.begin().await?;

        let invoice = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".into()))?;

        if !invoice.status.can_pay() {
            tracing::warn!("Pagamento recusado: fatura {} está '{}'", id, invoice.status);
            return Err(AppError::InvalidState(
                "Only a pending invoice can be paid".into(),
            ));
        }

        let paid = self.repo.set_status(&mut *tx, id, InvoiceStatus::Paid).await?;
        tx.commit().await?;

        tracing::info!("🧾 Fatura {} paga", id);
        Ok(paid)
    }

    pub async fn void(&self, id: Uuid) -> Result<Invoice, AppError> {
        let mut tx = self.pool.begin().await?;

        let invoice = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".into()))?;

        if !invoice.status.can_void() {
            tracing::warn!("Anulação recusada: fatura {} está '{}'", id, invoice.status);
            return Err(AppError::InvalidState(
                "Only a pending invoice can be voided".into(),
            ));
        }

        let voided = self.repo.set_status(&mut *tx, id, InvoiceStatus::Void).await?;
        tx.commit().await?;

        tracing::info!("🧾 Fatura {} anulada", id);
        Ok(voided)
    }

    pub async fn list(&self, filters: &InvoiceFilters) -> Result<Vec<InvoiceDetail>, AppError> {
        let rows = self.repo.list_billing_rows(filters).await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.build_detail(row).await?);
        }
        Ok(details)
    }

    pub async fn get(&self, id: Uuid) -> Result<InvoiceDetail, AppError> {
        let row = self
            .repo
            .find_billing_row(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".into()))?;

        self.build_detail(row).await
    }

    /// Junta o cabeçalho da fatura com o detalhamento: descrição do veículo,
    /// período da locação e a lista itemizada de sinistros.
    async fn build_detail(&self, row: InvoiceBillingRow) -> Result<InvoiceDetail, AppError> {
        let incidents = self.incident_repo.list_lines_by_lease(row.lease_id).await?;
        let incidents_total =
            invoice_total(Decimal::ZERO, incidents.iter().map(|line| line.cost));

        Ok(InvoiceDetail {
            vehicle_info: row.vehicle_info(),
            lease_dates: format_lease_dates(row.lease_start, row.lease_end),
            lease_amount: row.lease_amount,
            header: row.header(),
            incidents_total,
            incidents,
        })
    }
}
