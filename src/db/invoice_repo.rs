// src/db/invoice_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::invoice::{Invoice, InvoiceBillingRow, InvoiceFilters, InvoiceStatus},
};

// Colunas do JOIN com a locação faturada.
const BILLING_COLUMNS: &str = r#"
    i.id, i.lease_id, i.client_name, i.issued_date, i.total, i.payment_method, i.status,
    l.start_time AS lease_start, l.end_time AS lease_end, l.amount AS lease_amount,
    v.brand AS vehicle_brand, v.model AS vehicle_model, v.plate AS vehicle_plate
"#;

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list_billing_rows(
        &self,
        filters: &InvoiceFilters,
    ) -> Result<Vec<InvoiceBillingRow>, AppError> {
        let sql = format!(
            r#"
            SELECT {BILLING_COLUMNS}
            FROM invoices i
            JOIN leases l ON l.id = i.lease_id
            JOIN vehicles v ON v.id = l.vehicle_id
            WHERE ($1::invoice_status IS NULL OR i.status = $1)
              AND ($2::text IS NULL OR i.payment_method ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR i.client_name ILIKE '%' || $3 || '%')
            ORDER BY i.issued_date DESC
            LIMIT $4 OFFSET $5
            "#
        );
        let rows = sqlx::query_as::<_, InvoiceBillingRow>(&sql)
            .bind(filters.status)
            .bind(filters.payment_method.as_deref())
            .bind(filters.client_name.as_deref())
            .bind(filters.limit.unwrap_or(100))
            .bind(filters.skip.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_billing_row(&self, id: Uuid) -> Result<Option<InvoiceBillingRow>, AppError> {
        let sql = format!(
            r#"
            SELECT {BILLING_COLUMNS}
            FROM invoices i
            JOIN leases l ON l.id = i.lease_id
            JOIN vehicles v ON v.id = l.vehicle_id
            WHERE i.id = $1
            "#
        );
        let row = sqlx::query_as::<_, InvoiceBillingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    // ---
    // Funções Transacionais
    // ---

    /// Guard de cardinalidade 1:1 (também checado no lock de incidentes).
    pub async fn exists_for_lease<'e, E>(&self, executor: E, lease_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM invoices WHERE lease_id = $1")
            .bind(lease_id)
            .fetch_optional(executor)
            .await?;
        Ok(found.is_some())
    }

    /// Emite a fatura. A UNIQUE em `lease_id` decide corridas que passarem
    /// pelo guard ao mesmo tempo.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        lease_id: Uuid,
        client_name: &str,
        issued_date: NaiveDate,
        total: Decimal,
        payment_method: &str,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (lease_id, client_name, issued_date, total, payment_method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(lease_id)
        .bind(client_name)
        .bind(issued_date)
        .bind(total)
        .bind(payment_method)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Lease already has an invoice".into());
                }
            }
            AppError::from(e)
        })
    }

    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(invoice)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(invoice)
    }
}
