pub mod vehicle_repo;
pub use vehicle_repo::VehicleRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod lease_repo;
pub mod invoice_repo;
pub mod incident_repo;
pub mod maintenance_repo;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;

pub use incident_repo::IncidentRepository;
pub use invoice_repo::InvoiceRepository;
pub use lease_repo::LeaseRepository;
pub use maintenance_repo::MaintenanceRepository;
