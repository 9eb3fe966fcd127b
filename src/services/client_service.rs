// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClientRepository,
    models::client::{Client, ClientFilters, ClientStatus, CreateClientPayload, UpdateClientPayload},
};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
    pool: PgPool,
}

impl ClientService {
    pub fn new(repo: ClientRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create(&self, payload: &CreateClientPayload) -> Result<Client, AppError> {
        let client = self.repo.insert(&self.pool, payload).await?;
        tracing::info!("👤 Cliente {} cadastrado", client.id);
        Ok(client)
    }

    pub async fn list(&self, filters: &ClientFilters) -> Result<Vec<Client>, AppError> {
        self.repo.list(filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))
    }

    /// Atualização parcial: só os campos presentes no payload são aplicados.
    pub async fn update(&self, id: Uuid, payload: &UpdateClientPayload) -> Result<Client, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut client = self
            .repo
            .find_by_id_tx(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;

        if let Some(name) = &payload.name {
            client.name = name.clone();
        }
        if let Some(national_id) = &payload.national_id {
            client.national_id = national_id.clone();
        }
        if let Some(email) = &payload.email {
            client.email = Some(email.clone());
        }
        if let Some(phone) = &payload.phone {
            client.phone = Some(phone.clone());
        }
        if let Some(address) = &payload.address {
            client.address = Some(address.clone());
        }

        let updated = self.repo.update(&mut *tx, &client).await?;
        tx.commit().await?;

        Ok(updated)
    }

    pub async fn set_status(&self, id: Uuid, status: ClientStatus) -> Result<Client, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;

        self.repo.set_status(&self.pool, id, status).await
    }

    /// Exclusão lógica: o cliente vira 'inactive' e some das novas locações,
    /// mas o histórico dele continua íntegro.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;

        self.repo
            .set_status(&self.pool, id, ClientStatus::Inactive)
            .await?;

        tracing::info!("👤 Cliente {} desativado", id);
        Ok(())
    }
}
