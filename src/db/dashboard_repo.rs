// src/db/dashboard_repo.rs

use sqlx::PgPool;
use rust_decimal::Decimal;
use crate::{
    common::error::AppError,
    models::dashboard::{DashboardKpis, MonthlyRevenueRow, RecentRentalEntry, VehicleUsageEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Os cards do topo
    // Tudo dentro de uma transação (snapshot consistente dos dados).
    pub async fn kpis(&self) -> Result<DashboardKpis, AppError> {
        let mut tx = self.pool.begin().await?;

        // A. Receita total (só faturas pagas)
        let total_revenue = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total), 0) FROM invoices WHERE status = 'paid'",
        )
        .fetch_one(&mut *tx)
        .await?;

        // B. Total de locações (qualquer estado)
        let total_rentals =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leases")
                .fetch_one(&mut *tx)
                .await?;

        // C. Clientes ativos
        let active_clients = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE status = 'active'",
        )
        .fetch_one(&mut *tx)
        .await?;

        // D. Frota
        let available_vehicles = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vehicles WHERE status = 'available'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let total_vehicles =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles")
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(DashboardKpis {
            total_revenue,
            total_rentals,
            active_clients,
            available_vehicles,
            total_vehicles,
        })
    }

    // 2. Receita mensal do ano (faturas pagas, agrupadas por mês)
    pub async fn monthly_revenue(&self, year: i32) -> Result<Vec<MonthlyRevenueRow>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyRevenueRow>(
            r#"
            SELECT
                EXTRACT(MONTH FROM issued_date)::int AS month,
                SUM(total) AS total
            FROM invoices
            WHERE status = 'paid'
              AND EXTRACT(YEAR FROM issued_date)::int = $1
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // 3. Veículos mais locados (top 3 em quantidade de locações)
    pub async fn top_vehicles(&self, limit: i64) -> Result<Vec<VehicleUsageEntry>, AppError> {
        let rows = sqlx::query_as::<_, VehicleUsageEntry>(
            r#"
            SELECT
                v.brand || ' ' || v.model AS name,
                COUNT(l.id) AS rentals
            FROM leases l
            JOIN vehicles v ON l.vehicle_id = v.id
            GROUP BY v.id, v.brand, v.model
            ORDER BY rentals DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // 4. Últimas locações já faturadas (o total vem da fatura)
    pub async fn recent_invoiced_rentals(
        &self,
        limit: i64,
    ) -> Result<Vec<RecentRentalEntry>, AppError> {
        let rows = sqlx::query_as::<_, RecentRentalEntry>(
            r#"
            SELECT
                l.id AS rental_id,
                c.name AS client_name,
                v.brand || ' ' || v.model AS vehicle_name,
                l.start_time::date AS start_date,
                l.end_time::date AS end_date,
                i.total
            FROM leases l
            JOIN invoices i ON i.lease_id = l.id
            JOIN clients c ON l.client_id = c.id
            JOIN vehicles v ON l.vehicle_id = v.id
            ORDER BY l.start_time DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
