// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserView},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu username (login)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Listagem com o nome do funcionário vinculado já juntado
    pub async fn list(&self) -> Result<Vec<UserView>, AppError> {
        let users = sqlx::query_as::<_, UserView>(
            r#"
            SELECT u.id, u.employee_id, u.username, e.name AS employee_name, u.created_at
            FROM users u
            LEFT JOIN employees e ON e.id = u.employee_id
            ORDER BY u.username ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn find_view_by_id(&self, id: Uuid) -> Result<Option<UserView>, AppError> {
        let user = sqlx::query_as::<_, UserView>(
            r#"
            SELECT u.id, u.employee_id, u.username, e.name AS employee_name, u.created_at
            FROM users u
            LEFT JOIN employees e ON e.id = u.employee_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    // Cria um novo usuário no banco de dados
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        username: &str,
        hashed_password: &str,
        employee_id: Option<Uuid>,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, employee_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(username)
        .bind(hashed_password)
        .bind(employee_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("Username {} is already taken", username));
                }
            }
            AppError::from(e)
        })
    }

    pub async fn update_password(&self, id: Uuid, hashed_password: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET password_hash = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    // Troca (ou remove) o vínculo com um funcionário
    pub async fn update_employee(
        &self,
        id: Uuid,
        employee_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("UPDATE users SET employee_id = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(employee_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::NotFound("Employee not found".into());
                    }
                }
                AppError::from(e)
            })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
