// src/db/incident_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::incident::{Incident, IncidentDetail, IncidentFilters},
    models::invoice::IncidentLine,
};

// Colunas da projeção de leitura (funcionário + estado da locação juntados).
const DETAIL_COLUMNS: &str = r#"
    i.id, i.lease_id, i.employee_id, i.client_name, i.vehicle_name,
    i.type, i.description, i.cost, i.date,
    e.name AS employee_name, l.state AS lease_state
"#;

#[derive(Clone)]
pub struct IncidentRepository {
    pool: PgPool,
}

impl IncidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list(&self, filters: &IncidentFilters) -> Result<Vec<IncidentDetail>, AppError> {
        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM incidents i
            JOIN leases l ON l.id = i.lease_id
            LEFT JOIN employees e ON e.id = i.employee_id
            WHERE ($1::uuid IS NULL OR i.lease_id = $1)
              AND ($2::uuid IS NULL OR i.employee_id = $2)
              AND ($3::text IS NULL OR i.type ILIKE '%' || $3 || '%')
              AND ($4::date IS NULL OR i.date = $4)
            ORDER BY i.date DESC
            LIMIT $5 OFFSET $6
            "#
        );
        let incidents = sqlx::query_as::<_, IncidentDetail>(&sql)
            .bind(filters.lease_id)
            .bind(filters.employee_id)
            .bind(filters.kind.as_deref())
            .bind(filters.date)
            .bind(filters.limit.unwrap_or(100))
            .bind(filters.skip.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(incidents)
    }

    pub async fn find_detail(&self, id: Uuid) -> Result<Option<IncidentDetail>, AppError> {
        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM incidents i
            JOIN leases l ON l.id = i.lease_id
            LEFT JOIN employees e ON e.id = i.employee_id
            WHERE i.id = $1
            "#
        );
        let incident = sqlx::query_as::<_, IncidentDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(incident)
    }

    // ---
    // Funções Transacionais
    // ---

    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Incident>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let incident =
            sqlx::query_as::<_, Incident>("SELECT * FROM incidents WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(incident)
    }

    /// Custos dos incidentes de uma locação (entram no total da fatura).
    pub async fn list_costs_by_lease<'e, E>(
        &self,
        executor: E,
        lease_id: Uuid,
    ) -> Result<Vec<Option<Decimal>>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let costs: Vec<(Option<Decimal>,)> =
            sqlx::query_as("SELECT cost FROM incidents WHERE lease_id = $1")
                .bind(lease_id)
                .fetch_all(executor)
                .await?;
        Ok(costs.into_iter().map(|(c,)| c).collect())
    }

    /// Linhas itemizadas para o detalhe da fatura.
    pub async fn list_lines_by_lease(&self, lease_id: Uuid) -> Result<Vec<IncidentLine>, AppError> {
        let lines = sqlx::query_as::<_, IncidentLine>(
            "SELECT type, description, cost FROM incidents WHERE lease_id = $1 ORDER BY date ASC",
        )
        .bind(lease_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        lease_id: Uuid,
        employee_id: Option<Uuid>,
        client_name: &str,
        vehicle_name: &str,
        kind: &str,
        description: Option<&str>,
        cost: Option<Decimal>,
        date: NaiveDate,
    ) -> Result<Incident, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let incident = sqlx::query_as::<_, Incident>(
            r#"
            INSERT INTO incidents (lease_id, employee_id, client_name, vehicle_name, type, description, cost, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(lease_id)
        .bind(employee_id)
        .bind(client_name)
        .bind(vehicle_name)
        .bind(kind)
        .bind(description)
        .bind(cost)
        .bind(date)
        .fetch_one(executor)
        .await?;
        Ok(incident)
    }

    /// Reescreve descrição e custo (merge parcial já feito pelo service).
    pub async fn update_fields<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        description: Option<&str>,
        cost: Option<Decimal>,
    ) -> Result<Incident, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let incident = sqlx::query_as::<_, Incident>(
            "UPDATE incidents SET description = $2, cost = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(description)
        .bind(cost)
        .fetch_one(executor)
        .await?;
        Ok(incident)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
