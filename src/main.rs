use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use transport_portal::config::EnvironmentConfig;
use transport_portal::{create_app_router, AppState};

/// Cada cuánto se purgan las sesiones expiradas
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚚 Transport Portal ({})", config.environment);
    info!("================================================");
    info!("🔗 API de transporte: {}", config.api_base_url);
    if config.is_production() && config.cors_origins.is_empty() {
        info!("🔒 Producción sin CORS_ORIGINS: no se aceptan orígenes externos");
    }

    let state = AppState::new(config.clone())?;

    // Limpieza periódica de sesiones
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired().await;
            if removed > 0 {
                info!("🧹 {} sesiones expiradas eliminadas", removed);
            }
        }
    });

    let app = create_app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en {}", config.server_url());
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /login, /logout - Sesión");
    info!("   /account - Perfil, contraseña y sesión actual");
    info!("   /admin - Usuarios, camiones, órdenes, gastos, transferencias");
    info!("   /owner - Camiones y órdenes propias");
    info!("   /driver - Órdenes asignadas, gastos y transferencias");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
