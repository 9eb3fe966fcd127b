// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Leases ---
        handlers::leases::create_lease,
        handlers::leases::list_leases,
        handlers::leases::get_lease,
        handlers::leases::update_lease,
        handlers::leases::confirm_lease,
        handlers::leases::cancel_lease,
        handlers::leases::finalize_lease,
        handlers::leases::delete_lease,

        // --- Invoices ---
        handlers::invoices::create_invoice,
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::pay_invoice,
        handlers::invoices::void_invoice,

        // --- Incidents ---
        handlers::incidents::create_incident,
        handlers::incidents::list_incidents,
        handlers::incidents::get_incident,
        handlers::incidents::update_incident,
        handlers::incidents::delete_incident,

        // --- Maintenance ---
        handlers::maintenance::create_maintenance,
        handlers::maintenance::list_maintenance,
        handlers::maintenance::get_maintenance,
        handlers::maintenance::finish_maintenance,
        handlers::maintenance::delete_maintenance,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            // --- Vehicles ---
            models::vehicle::VehicleStatus,
            models::vehicle::Vehicle,
            models::vehicle::CreateVehiclePayload,
            models::vehicle::UpdateVehiclePayload,
            models::vehicle::UpdateVehicleStatusPayload,

            // --- Clients ---
            models::client::ClientStatus,
            models::client::Client,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,
            models::client::UpdateClientStatusPayload,

            // --- Employees ---
            models::employee::Employee,
            models::employee::CreateEmployeePayload,
            models::employee::UpdateEmployeePayload,

            // --- Auth ---
            models::auth::UserView,
            models::auth::CreateUserPayload,
            models::auth::LoginPayload,
            models::auth::UpdatePasswordPayload,
            models::auth::UpdateUserPayload,
            models::auth::LoginResponse,

            // --- Leases ---
            models::lease::LeaseState,
            models::lease::Lease,
            models::lease::LeaseDetail,
            handlers::leases::CreateLeasePayload,
            handlers::leases::UpdateLeasePayload,
            handlers::leases::FinalizeLeasePayload,

            // --- Invoices ---
            models::invoice::InvoiceStatus,
            models::invoice::Invoice,
            models::invoice::IncidentLine,
            models::invoice::InvoiceDetail,
            handlers::invoices::CreateInvoicePayload,

            // --- Incidents ---
            models::incident::Incident,
            models::incident::IncidentDetail,
            handlers::incidents::CreateIncidentPayload,
            handlers::incidents::UpdateIncidentPayload,

            // --- Maintenance ---
            models::maintenance::MaintenanceStatus,
            models::maintenance::Maintenance,
            handlers::maintenance::CreateMaintenancePayload,

            // --- Dashboard ---
            models::dashboard::DashboardKpis,
            models::dashboard::MonthlyRevenueEntry,
            models::dashboard::VehicleUsageEntry,
            models::dashboard::RecentRentalEntry,
            models::dashboard::DashboardData,
        )
    ),
    tags(
        (name = "Auth", description = "Login de usuários"),
        (name = "Leases", description = "Ciclo de vida das locações"),
        (name = "Invoices", description = "Faturamento das locações"),
        (name = "Incidents", description = "Sinistros e infrações"),
        (name = "Maintenance", description = "Manutenção da frota"),
        (name = "Dashboard", description = "Indicadores e gráficos gerenciais")
    )
)]
pub struct ApiDoc;
