// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

// pending -> paid | void. Os dois estados finais são terminais; estornar
// uma fatura paga é outra operação, fora deste fluxo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Void => "void",
        }
    }

    pub fn can_pay(&self) -> bool {
        matches!(self, InvoiceStatus::Pending)
    }

    pub fn can_void(&self) -> bool {
        matches!(self, InvoiceStatus::Pending)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    pub lease_id: Uuid,
    // Snapshot tirado na emissão; não acompanha renomes do cliente.
    #[schema(example = "Maria García")]
    pub client_name: String,
    pub issued_date: NaiveDate,
    #[schema(example = "175.50")]
    pub total: Decimal,
    #[schema(example = "card")]
    pub payment_method: String,
    pub status: InvoiceStatus,
}

// Linha de incidente dentro do detalhe da fatura.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentLine {
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "scratch")]
    pub kind: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
}

// Detalhe da fatura: o cabeçalho mais o contexto da locação faturada.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub header: Invoice,
    #[schema(example = "Toyota Corolla - AB123CD")]
    pub vehicle_info: String,
    #[schema(example = "2024-01-15 to 2024-01-18")]
    pub lease_dates: String,
    pub lease_amount: Decimal,
    pub incidents_total: Decimal,
    pub incidents: Vec<IncidentLine>,
}

// Linha interna do JOIN fatura + locação + veículo; o service monta o
// `InvoiceDetail` a partir dela.
#[derive(Debug, FromRow)]
pub struct InvoiceBillingRow {
    pub id: Uuid,
    pub lease_id: Uuid,
    pub client_name: String,
    pub issued_date: NaiveDate,
    pub total: Decimal,
    pub payment_method: String,
    pub status: InvoiceStatus,
    pub lease_start: DateTime<Utc>,
    pub lease_end: DateTime<Utc>,
    pub lease_amount: Decimal,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_plate: String,
}

impl InvoiceBillingRow {
    pub fn header(&self) -> Invoice {
        Invoice {
            id: self.id,
            lease_id: self.lease_id,
            client_name: self.client_name.clone(),
            issued_date: self.issued_date,
            total: self.total,
            payment_method: self.payment_method.clone(),
            status: self.status,
        }
    }

    pub fn vehicle_info(&self) -> String {
        format!(
            "{} {} - {}",
            self.vehicle_brand, self.vehicle_model, self.vehicle_plate
        )
    }
}

// Filtros de listagem (query string)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFilters {
    pub status: Option<InvoiceStatus>,
    pub payment_method: Option<String>,
    /// Busca por substring no snapshot do nome do cliente.
    pub client_name: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// --- Regras puras ---

/// Total da fatura: valor da locação mais a soma dos custos de incidente.
/// Custos ausentes contam como zero.
pub fn invoice_total<I>(lease_amount: Decimal, incident_costs: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    let incidents: Decimal = incident_costs
        .into_iter()
        .map(|c| c.unwrap_or_default())
        .sum();
    lease_amount + incidents
}

/// Faixa de datas da locação no formato exibido na fatura.
pub fn format_lease_dates(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{} to {}", start.date_naive(), end.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn total_sums_lease_and_incidents() {
        let total = invoice_total(
            Decimal::new(15000, 2),
            vec![Some(Decimal::new(2000, 2)), Some(Decimal::new(3000, 2))],
        );
        assert_eq!(total, Decimal::new(20000, 2));
    }

    #[test]
    fn missing_costs_count_as_zero() {
        let total = invoice_total(
            Decimal::new(15000, 2),
            vec![Some(Decimal::new(2000, 2)), None, Some(Decimal::new(3000, 2))],
        );
        assert_eq!(total, Decimal::new(20000, 2));
    }

    #[test]
    fn total_without_incidents_is_lease_amount() {
        let total = invoice_total(Decimal::new(15000, 2), vec![]);
        assert_eq!(total, Decimal::new(15000, 2));
    }

    #[test]
    fn only_pending_can_change() {
        assert!(InvoiceStatus::Pending.can_pay());
        assert!(InvoiceStatus::Pending.can_void());
        assert!(!InvoiceStatus::Paid.can_pay());
        assert!(!InvoiceStatus::Paid.can_void());
        assert!(!InvoiceStatus::Void.can_pay());
        assert!(!InvoiceStatus::Void.can_void());
    }

    #[test]
    fn lease_dates_use_iso_days() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 18, 18, 0, 0).unwrap();
        assert_eq!(format_lease_dates(start, end), "2024-01-15 to 2024-01-18");
    }
}
