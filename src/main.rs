//src/main.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let vehicle_routes = Router::new()
        .route("/"
               ,post(handlers::vehicles::create_vehicle)
               .get(handlers::vehicles::list_vehicles)
        )
        .route("/{id}"
               ,get(handlers::vehicles::get_vehicle)
               .put(handlers::vehicles::update_vehicle)
               .delete(handlers::vehicles::delete_vehicle)
        )
        .route("/{id}/status", patch(handlers::vehicles::update_vehicle_status));

    let client_routes = Router::new()
        .route("/"
               ,post(handlers::clients::create_client)
               .get(handlers::clients::list_clients)
        )
        .route("/{id}"
               ,get(handlers::clients::get_client)
               .put(handlers::clients::update_client)
               .delete(handlers::clients::delete_client)
        )
        .route("/{id}/status", patch(handlers::clients::update_client_status));

    let employee_routes = Router::new()
        .route("/"
               ,post(handlers::employees::create_employee)
               .get(handlers::employees::list_employees)
        )
        .route("/{id}"
               ,get(handlers::employees::get_employee)
               .put(handlers::employees::update_employee)
               .delete(handlers::employees::delete_employee)
        );

    let user_routes = Router::new()
        .route("/"
               ,post(handlers::auth::create_user)
               .get(handlers::auth::list_users)
        )
        .route("/{id}"
               ,get(handlers::auth::get_user)
               .patch(handlers::auth::update_user)
               .delete(handlers::auth::delete_user)
        )
        .route("/{id}/password", patch(handlers::auth::update_user_password));

    // Login é público; não há camada de sessão por cima.
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login));

    let lease_routes = Router::new()
        .route("/"
               ,post(handlers::leases::create_lease)
               .get(handlers::leases::list_leases)
        )
        .route("/{id}"
               ,get(handlers::leases::get_lease)
               .put(handlers::leases::update_lease)
               .delete(handlers::leases::delete_lease)
        )
        .route("/{id}/confirm", patch(handlers::leases::confirm_lease))
        .route("/{id}/cancel", patch(handlers::leases::cancel_lease))
        .route("/{id}/finalize", patch(handlers::leases::finalize_lease));

    let invoice_routes = Router::new()
        .route("/"
               ,post(handlers::invoices::create_invoice)
               .get(handlers::invoices::list_invoices)
        )
        .route("/{id}", get(handlers::invoices::get_invoice))
        .route("/{id}/pay", patch(handlers::invoices::pay_invoice))
        .route("/{id}/void", patch(handlers::invoices::void_invoice));

    let incident_routes = Router::new()
        .route("/"
               ,post(handlers::incidents::create_incident)
               .get(handlers::incidents::list_incidents)
        )
        .route("/{id}"
               ,get(handlers::incidents::get_incident)
               .put(handlers::incidents::update_incident)
               .delete(handlers::incidents::delete_incident)
        );

    let maintenance_routes = Router::new()
        .route("/"
               ,post(handlers::maintenance::create_maintenance)
               .get(handlers::maintenance::list_maintenance)
        )
        .route("/{id}"
               ,get(handlers::maintenance::get_maintenance)
               .delete(handlers::maintenance::delete_maintenance)
        )
        .route("/{id}/finish", patch(handlers::maintenance::finish_maintenance));

    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::get_dashboard));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/vehicles", vehicle_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/employees", employee_routes)
        .nest("/api/users", user_routes)
        .nest("/api/auth", auth_routes)
        .nest("/api/leases", lease_routes)
        .nest("/api/invoices", invoice_routes)
        .nest("/api/incidents", incident_routes)
        .nest("/api/maintenance", maintenance_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
