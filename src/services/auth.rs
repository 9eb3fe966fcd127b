// src/services/auth.rs

use bcrypt::{hash, verify};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EmployeeRepository, UserRepository},
    models::auth::{CreateUserPayload, LoginResponse, UpdateUserPayload, UserView},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, employee_repo: EmployeeRepository, pool: PgPool) -> Self {
        Self {
            user_repo,
            employee_repo,
            pool,
        }
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> Result<UserView, AppError> {
        // O hashing fica fora da transação (não toca no banco e é pesado).
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let mut tx = self.pool.begin().await?;

        // Vínculo opcional com funcionário: valida antes de gravar.
        if let Some(employee_id) = payload.employee_id {
            if !self.employee_repo.exists(&mut *tx, employee_id).await? {
                return Err(AppError::NotFound("Employee not found".into()));
            }
        }

        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &payload.username,
                &hashed_password,
                payload.employee_id,
            )
            .await?;

        tx.commit().await?;

        tracing::info!("👥 Usuário {} criado", user.username);

        self.user_repo
            .find_view_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn list_users(&self) -> Result<Vec<UserView>, AppError> {
        self.user_repo.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<UserView, AppError> {
        self.user_repo
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn update_password(&self, id: Uuid, password: &str) -> Result<UserView, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo.update_password(id, &hashed_password).await?;

        self.user_repo
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Refaz (ou remove, com null) o vínculo do usuário com um funcionário.
    pub async fn update_user(
        &self,
        id: Uuid,
        payload: &UpdateUserPayload,
    ) -> Result<UserView, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        if let Some(employee_id) = payload.employee_id {
            if !self.employee_repo.exists(&self.pool, employee_id).await? {
                return Err(AppError::NotFound("Employee not found".into()));
            }
        }

        self.user_repo.update_employee(id, payload.employee_id).await?;

        self.user_repo
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        self.user_repo.delete(id).await
    }

    /// Login sem emissão de token: confere a senha e devolve o perfil.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let view = self
            .user_repo
            .find_view_by_id(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        tracing::info!("🔓 Login de {}", view.username);

        Ok(LoginResponse {
            user_id: view.id,
            employee_id: view.employee_id,
            username: view.username,
            employee_name: view.employee_name,
        })
    }
}
