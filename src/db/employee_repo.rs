// src/db/employee_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::employee::{CreateEmployeePayload, Employee, EmployeeFilters},
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filters: &EmployeeFilters) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT * FROM employees
            WHERE ($1::text IS NULL OR role ILIKE '%' || $1 || '%')
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filters.role.as_deref())
        .bind(filters.limit.unwrap_or(100))
        .bind(filters.skip.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    /// Checagem de existência dentro de uma transação (guard de criação
    /// de locação/incidente/manutenção).
    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(found.is_some())
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        payload: &CreateEmployeePayload,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, national_id, email, phone, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.national_id)
        .bind(payload.email.as_deref())
        .bind(payload.phone.as_deref())
        .bind(&payload.role)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "An employee with national ID {} already exists",
                        payload.national_id
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(&self, executor: E, employee: &Employee) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET name = $2, national_id = $3, email = $4, phone = $5, role = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(employee.id)
        .bind(&employee.name)
        .bind(&employee.national_id)
        .bind(employee.email.as_deref())
        .bind(employee.phone.as_deref())
        .bind(&employee.role)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "An employee with national ID {} already exists",
                        employee.national_id
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::Conflict(
                            "Employee is referenced by leases and cannot be deleted".into(),
                        );
                    }
                }
                AppError::from(e)
            })?;
        Ok(())
    }
}
