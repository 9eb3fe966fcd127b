// src/db/lease_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lease::{Lease, LeaseDetail, LeaseFilters},
};

// Colunas da projeção desnormalizada (GET/list).
const DETAIL_COLUMNS: &str = r#"
    l.id, l.client_id, c.name AS client_name,
    l.vehicle_id, v.brand AS vehicle_brand, v.model AS vehicle_model, v.plate AS vehicle_plate,
    l.employee_id, e.name AS employee_name,
    l.start_time, l.end_time, l.amount, l.state,
    l.created_date, l.confirmed_date, l.cancelled_date,
    l.start_odometer, l.end_odometer
"#;

#[derive(Clone)]
pub struct LeaseRepository {
    pool: PgPool,
}

impl LeaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list(&self, filters: &LeaseFilters) -> Result<Vec<LeaseDetail>, AppError> {
        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM leases l
            JOIN clients c ON c.id = l.client_id
            JOIN vehicles v ON v.id = l.vehicle_id
            JOIN employees e ON e.id = l.employee_id
            WHERE ($1::uuid IS NULL OR l.client_id = $1)
              AND ($2::uuid IS NULL OR l.vehicle_id = $2)
              AND ($3::lease_state IS NULL OR l.state = $3)
              AND ($4::date IS NULL OR l.created_date = $4)
            ORDER BY l.created_date DESC, l.start_time DESC
            LIMIT $5 OFFSET $6
            "#
        );
        let leases = sqlx::query_as::<_, LeaseDetail>(&sql)
            .bind(filters.client_id)
            .bind(filters.vehicle_id)
            .bind(filters.state)
            .bind(filters.date)
            .bind(filters.limit.unwrap_or(100))
            .bind(filters.skip.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(leases)
    }

    pub async fn find_detail(&self, id: Uuid) -> Result<Option<LeaseDetail>, AppError> {
        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM leases l
            JOIN clients c ON c.id = l.client_id
            JOIN vehicles v ON v.id = l.vehicle_id
            JOIN employees e ON e.id = l.employee_id
            WHERE l.id = $1
            "#
        );
        let lease = sqlx::query_as::<_, LeaseDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lease)
    }

    // ---
    // Funções Transacionais
    // ---

    /// Lê a locação travando a linha; todo guard de transição parte daqui.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Lease>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lease = sqlx::query_as::<_, Lease>("SELECT * FROM leases WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(lease)
    }

    pub async fn find_by_id_tx<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Lease>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lease = sqlx::query_as::<_, Lease>("SELECT * FROM leases WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(lease)
    }

    /// Insere a locação já no estado inicial explícito `created`.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        vehicle_id: Uuid,
        employee_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        amount: Decimal,
        created_date: NaiveDate,
        start_odometer: Option<i32>,
    ) -> Result<Lease, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lease = sqlx::query_as::<_, Lease>(
            r#"
            INSERT INTO leases
                (client_id, vehicle_id, employee_id, start_time, end_time, amount, state, created_date, start_odometer)
            VALUES ($1, $2, $3, $4, $5, $6, 'created', $7, $8)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(vehicle_id)
        .bind(employee_id)
        .bind(start_time)
        .bind(end_time)
        .bind(amount)
        .bind(created_date)
        .bind(start_odometer)
        .fetch_one(executor)
        .await?;
        Ok(lease)
    }

    /// Reescreve os campos editáveis (merge parcial já feito pelo service).
    pub async fn update_fields<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        start_odometer: Option<i32>,
        amount: Decimal,
    ) -> Result<Lease, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lease = sqlx::query_as::<_, Lease>(
            r#"
            UPDATE leases
            SET start_time = $2, end_time = $3, start_odometer = $4, amount = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(start_time)
        .bind(end_time)
        .bind(start_odometer)
        .bind(amount)
        .fetch_one(executor)
        .await?;
        Ok(lease)
    }

    pub async fn mark_confirmed<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        confirmed_date: NaiveDate,
    ) -> Result<Lease, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lease = sqlx::query_as::<_, Lease>(
            "UPDATE leases SET state = 'confirmed', confirmed_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(confirmed_date)
        .fetch_one(executor)
        .await?;
        Ok(lease)
    }

    pub async fn mark_cancelled<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        cancelled_date: NaiveDate,
    ) -> Result<Lease, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lease = sqlx::query_as::<_, Lease>(
            "UPDATE leases SET state = 'cancelled', cancelled_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(cancelled_date)
        .fetch_one(executor)
        .await?;
        Ok(lease)
    }

    pub async fn mark_finalized<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        end_odometer: i32,
    ) -> Result<Lease, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lease = sqlx::query_as::<_, Lease>(
            "UPDATE leases SET state = 'finalized', end_odometer = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(end_odometer)
        .fetch_one(executor)
        .await?;
        Ok(lease)
    }

    /// Delete físico. Incidentes da locação caem junto (FK em cascata).
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM leases WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::Conflict(
                            "Lease has an invoice and cannot be deleted".into(),
                        );
                    }
                }
                AppError::from(e)
            })?;
        Ok(())
    }
}
