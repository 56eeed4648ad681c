mod config;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{http::StatusCode, response::Json, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use dto::messages::ROUTE_NOT_FOUND;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Piplan API");
    info!("==========");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };
    let rate_limit_state = RateLimitState::new(&config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .nest(
            "/api/v1/user",
            routes::user_routes::create_user_router(app_state.clone()),
        )
        .nest(
            "/api/v1/project",
            routes::project_routes::create_project_router(app_state.clone()),
        )
        .nest(
            "/api/v1/project-goal",
            routes::project_goal_routes::create_project_goal_router(app_state.clone()),
        )
        .nest(
            "/api/v1/user_project",
            routes::user_project_routes::create_user_project_router(app_state.clone()),
        )
        .nest(
            "/api/v1/department",
            routes::department_routes::create_department_router(app_state.clone()),
        )
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ))
        .layer(cors)
        .with_state(app_state);

    info!("Servidor iniciando en http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Cualquier ruta desconocida responde con el mismo envelope de error
async fn route_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": 404,
            "success": false,
            "message": ROUTE_NOT_FOUND,
        })),
    )
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("Señal de terminación recibida, apagando servidor...");
        },
    }
}
