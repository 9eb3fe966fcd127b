pub mod auth;
pub use auth::AuthService;
pub mod vehicle_service;
pub use vehicle_service::VehicleService;
pub mod client_service;
pub use client_service::ClientService;
pub mod employee_service;
pub use employee_service::EmployeeService;
pub mod lease_service;
pub mod invoice_service;
pub mod incident_service;
pub mod maintenance_service;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;

pub use incident_service::IncidentService;
pub use invoice_service::InvoiceService;
pub use lease_service::LeaseService;
pub use maintenance_service::MaintenanceService;
