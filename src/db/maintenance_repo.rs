// src/db/maintenance_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::maintenance::{Maintenance, MaintenanceFilters},
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list(&self, filters: &MaintenanceFilters) -> Result<Vec<Maintenance>, AppError> {
        let windows = sqlx::query_as::<_, Maintenance>(
            r#"
            SELECT * FROM maintenance
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
              AND ($2::uuid IS NULL OR employee_id = $2)
              AND ($3::maintenance_status IS NULL OR status = $3)
            ORDER BY start_date DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(filters.employee_id)
        .bind(filters.status)
        .bind(filters.limit.unwrap_or(100))
        .bind(filters.skip.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(windows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Maintenance>, AppError> {
        let window = sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenance WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(window)
    }

    // ---
    // Funções Transacionais
    // ---

    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Maintenance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let window =
            sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenance WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(window)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        vehicle_id: Uuid,
        employee_id: Option<Uuid>,
        vehicle_name: &str,
        kind: &str,
        description: Option<&str>,
        cost: Option<Decimal>,
        start_date: DateTime<Utc>,
    ) -> Result<Maintenance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let window = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenance (vehicle_id, employee_id, vehicle_name, type, description, cost, start_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(employee_id)
        .bind(vehicle_name)
        .bind(kind)
        .bind(description)
        .bind(cost)
        .bind(start_date)
        .fetch_one(executor)
        .await?;
        Ok(window)
    }

    pub async fn mark_finished<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        end_date: DateTime<Utc>,
    ) -> Result<Maintenance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let window = sqlx::query_as::<_, Maintenance>(
            "UPDATE maintenance SET status = 'finished', end_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(end_date)
        .fetch_one(executor)
        .await?;
        Ok(window)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM maintenance WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
