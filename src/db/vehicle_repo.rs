// src/db/vehicle_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::vehicle::{CreateVehiclePayload, Vehicle, VehicleFilters, VehicleStatus},
};

#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Leituras simples fora de transação usam a pool principal.

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::vehicle_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR brand ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR model ILIKE '%' || $3 || '%')
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.status)
        .bind(filters.brand.as_deref())
        .bind(filters.model.as_deref())
        .bind(filters.limit.unwrap_or(100))
        .bind(filters.skip.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    // ---
    // Funções Transacionais
    // ---
    // Estas usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    pub async fn find_by_id_tx<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Vehicle>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(vehicle)
    }

    /// Lê o veículo travando a linha até o fim da transação. É o que impede
    /// duas requisições de passarem pelo mesmo guard de disponibilidade.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(vehicle)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        payload: &CreateVehiclePayload,
    ) -> Result<Vehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (brand, model, plate, year, price_per_day, thumbnail, seats, transmission, fuel, odometer)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(&payload.plate)
        .bind(payload.year)
        .bind(payload.price_per_day)
        .bind(payload.thumbnail.as_deref())
        .bind(payload.seats)
        .bind(&payload.transmission)
        .bind(&payload.fuel)
        .bind(payload.odometer)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "A vehicle with plate {} already exists",
                        payload.plate
                    ));
                }
            }
            e.into()
        })
    }

    /// Atualização completa; o service já aplicou o merge parcial.
    pub async fn update<'e, E>(&self, executor: E, vehicle: &Vehicle) -> Result<Vehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, plate = $4, year = $5, price_per_day = $6,
                thumbnail = $7, seats = $8, transmission = $9, fuel = $10, odometer = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.plate)
        .bind(vehicle.year)
        .bind(vehicle.price_per_day)
        .bind(vehicle.thumbnail.as_deref())
        .bind(vehicle.seats)
        .bind(&vehicle.transmission)
        .bind(&vehicle.fuel)
        .bind(vehicle.odometer)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "A vehicle with plate {} already exists",
                        vehicle.plate
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<Vehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(vehicle)
    }

    /// Libera o veículo e grava a leitura final do odômetro (encerramento).
    pub async fn set_status_and_odometer<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: VehicleStatus,
        odometer: i32,
    ) -> Result<Vehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = $2, odometer = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(odometer)
        .fetch_one(executor)
        .await?;
        Ok(vehicle)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::Conflict(
                            "Vehicle has leases or maintenance records and cannot be deleted"
                                .into(),
                        );
                    }
                }
                AppError::from(e)
            })?;
        Ok(())
    }
}
