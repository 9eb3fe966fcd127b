// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Rótulos de mês que o frontend exibe como vêm.
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

// Nome do balde que agrega os veículos fora do top 3.
pub const OTHER_BUCKET: &str = "Otro";

// 1. Os cards do topo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub total_revenue: Decimal, // Faturas pagas
    pub total_rentals: i64,
    pub active_clients: i64,
    pub available_vehicles: i64,
    pub total_vehicles: i64,
}

// 2. Receita por mês do ano corrente (faturas pagas)
#[derive(Debug, FromRow)]
pub struct MonthlyRevenueRow {
    pub month: Option<i32>, // 1..=12
    pub total: Option<Decimal>,
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueEntry {
    #[schema(example = "Ene")]
    pub month: String,
    pub total: Decimal,
}

// 3. Veículos mais locados (top 3 + "Otro")
#[derive(Debug, Serialize, PartialEq, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUsageEntry {
    #[schema(example = "Toyota Corolla")]
    pub name: String,
    pub rentals: i64,
}

// 4. Últimas locações já faturadas
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentRentalEntry {
    pub rental_id: Uuid,
    pub client_name: String,
    pub vehicle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub kpis: DashboardKpis,
    pub monthly_revenue: Vec<MonthlyRevenueEntry>,
    pub popular_vehicles: Vec<VehicleUsageEntry>,
    pub detailed_rentals: Vec<RecentRentalEntry>,
}

// --- Montagem ---

/// Expande as linhas agrupadas do banco nos 12 meses do ano, preenchendo
/// com zero os meses sem receita.
pub fn fill_monthly_revenue(rows: &[MonthlyRevenueRow]) -> Vec<MonthlyRevenueEntry> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let month = (i + 1) as i32;
            let total = rows
                .iter()
                .find(|r| r.month == Some(month))
                .and_then(|r| r.total)
                .unwrap_or_default();
            MonthlyRevenueEntry {
                month: (*label).to_string(),
                total,
            }
        })
        .collect()
}

/// Acrescenta o balde "Otro" quando existem locações fora do top listado.
pub fn append_other_bucket(
    mut top: Vec<VehicleUsageEntry>,
    total_rentals: i64,
) -> Vec<VehicleUsageEntry> {
    let top_count: i64 = top.iter().map(|v| v.rentals).sum();
    let rest = total_rentals - top_count;
    if rest > 0 {
        top.push(VehicleUsageEntry {
            name: OTHER_BUCKET.to_string(),
            rentals: rest,
        });
    }
    top
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_fill_covers_all_twelve_months() {
        let rows = vec![
            MonthlyRevenueRow {
                month: Some(1),
                total: Some(Decimal::new(10000, 2)),
            },
            MonthlyRevenueRow {
                month: Some(3),
                total: Some(Decimal::new(5000, 2)),
            },
        ];
        let filled = fill_monthly_revenue(&rows);
        assert_eq!(filled.len(), 12);
        assert_eq!(filled[0].month, "Ene");
        assert_eq!(filled[0].total, Decimal::new(10000, 2));
        assert_eq!(filled[1].total, Decimal::ZERO);
        assert_eq!(filled[2].total, Decimal::new(5000, 2));
        assert_eq!(filled[11].month, "Dic");
    }

    #[test]
    fn other_bucket_collects_the_rest() {
        let top = vec![
            VehicleUsageEntry {
                name: "Toyota Corolla".into(),
                rentals: 5,
            },
            VehicleUsageEntry {
                name: "Fiat Cronos".into(),
                rentals: 3,
            },
        ];
        let all = append_other_bucket(top, 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].name, "Otro");
        assert_eq!(all[2].rentals, 2);
    }

    #[test]
    fn no_other_bucket_when_top_covers_everything() {
        let top = vec![VehicleUsageEntry {
            name: "Toyota Corolla".into(),
            rentals: 4,
        }];
        let all = append_other_bucket(top, 4);
        assert_eq!(all.len(), 1);
    }
}
