// src/config.rs

use crate::{
    db::{
        ClientRepository, DashboardRepository, EmployeeRepository, IncidentRepository,
        InvoiceRepository, LeaseRepository, MaintenanceRepository, UserRepository,
        VehicleRepository,
    },
    services::{
        AuthService, ClientService, DashboardService, EmployeeService, IncidentService,
        InvoiceService, LeaseService, MaintenanceService, VehicleService,
    },
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub vehicle_service: VehicleService,
    pub client_service: ClientService,
    pub employee_service: EmployeeService,
    pub auth_service: AuthService,
    pub lease_service: LeaseService,
    pub invoice_service: InvoiceService,
    pub incident_service: IncidentService,
    pub maintenance_service: MaintenanceService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem chama decide.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let vehicle_repo = VehicleRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let lease_repo = LeaseRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());
        let incident_repo = IncidentRepository::new(db_pool.clone());
        let maintenance_repo = MaintenanceRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let vehicle_service = VehicleService::new(vehicle_repo.clone(), db_pool.clone());
        let client_service = ClientService::new(client_repo.clone(), db_pool.clone());
        let employee_service = EmployeeService::new(employee_repo.clone(), db_pool.clone());
        let auth_service = AuthService::new(user_repo, employee_repo.clone(), db_pool.clone());
        let lease_service = LeaseService::new(
            lease_repo.clone(),
            vehicle_repo.clone(),
            client_repo.clone(),
            employee_repo.clone(),
            db_pool.clone(),
        );
        let invoice_service = InvoiceService::new(
            invoice_repo.clone(),
            lease_repo.clone(),
            client_repo.clone(),
            incident_repo.clone(),
            db_pool.clone(),
        );
        let incident_service = IncidentService::new(
            incident_repo,
            lease_repo,
            invoice_repo,
            client_repo,
            vehicle_repo.clone(),
            employee_repo.clone(),
            db_pool.clone(),
        );
        let maintenance_service = MaintenanceService::new(
            maintenance_repo,
            vehicle_repo,
            employee_repo,
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            vehicle_service,
            client_service,
            employee_service,
            auth_service,
            lease_service,
            invoice_service,
            incident_service,
            maintenance_service,
            dashboard_service,
        })
    }
}
