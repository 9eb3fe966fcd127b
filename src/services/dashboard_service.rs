// src/services/dashboard_service.rs

use chrono::{Datelike, Utc};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{append_other_bucket, fill_monthly_revenue, DashboardData},
};

const TOP_VEHICLES: i64 = 3;
const RECENT_RENTALS: i64 = 10;

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    /// Monta o painel inteiro: KPIs, receita mês a mês do ano corrente,
    /// veículos mais locados (top 3 + "Otro") e as últimas locações faturadas.
    pub async fn summary(&self) -> Result<DashboardData, AppError> {
        let kpis = self.repo.kpis().await?;

        let rows = self.repo.monthly_revenue(Utc::now().year()).await?;
        let monthly_revenue = fill_monthly_revenue(&rows);

        let top = self.repo.top_vehicles(TOP_VEHICLES).await?;
        let popular_vehicles = append_other_bucket(top, kpis.total_rentals);

        let detailed_rentals = self.repo.recent_invoiced_rentals(RECENT_RENTALS).await?;

        Ok(DashboardData {
            kpis,
            monthly_revenue,
            popular_vehicles,
            detailed_rentals,
        })
    }
}
