pub mod auth;
pub mod client;
pub mod dashboard;
pub mod employee;
pub mod incident;
pub mod invoice;
pub mod lease;
pub mod maintenance;
pub mod vehicle;
