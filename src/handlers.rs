pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod employees;
pub mod incidents;
pub mod invoices;
pub mod leases;
pub mod maintenance;
pub mod vehicles;
