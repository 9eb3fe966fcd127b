// src/services/employee_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EmployeeRepository,
    models::employee::{CreateEmployeePayload, Employee, EmployeeFilters, UpdateEmployeePayload},
};

#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(repo: EmployeeRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create(&self, payload: &CreateEmployeePayload) -> Result<Employee, AppError> {
        self.repo.insert(&self.pool, payload).await
    }

    pub async fn list(&self, filters: &EmployeeFilters) -> Result<Vec<Employee>, AppError> {
        self.repo.list(filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))
    }

    /// Atualização parcial: só os campos presentes no payload são aplicados.
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateEmployeePayload,
    ) -> Result<Employee, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut employee = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))?;

        if let Some(name) = &payload.name {
            employee.name = name.clone();
        }
        if let Some(national_id) = &payload.national_id {
            employee.national_id = national_id.clone();
        }
        if let Some(email) = &payload.email {
            employee.email = Some(email.clone());
        }
        if let Some(phone) = &payload.phone {
            employee.phone = Some(phone.clone());
        }
        if let Some(role) = &payload.role {
            employee.role = role.clone();
        }

        let updated = self.repo.update(&mut *tx, &employee).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Exclusão física. Funcionário referenciado por locações vira Conflict
    /// lá no repo (violação de FK).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))?;

        self.repo.delete(&self.pool, id).await?;
        Ok(())
    }
}
