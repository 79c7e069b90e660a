use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use parking_ledger::config::environment::EnvironmentConfig;
use parking_ledger::create_app;
use parking_ledger::services::AccrualScheduler;
use parking_ledger::snapshot::{FileSnapshotStore, SnapshotPublisher};
use parking_ledger::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🅿️ Parking Ledger");
    info!("================================================");
    info!("   Capacidad: {} plazas", config.capacity);
    info!("   Acumulación cada {:?}", config.accrual_interval);
    info!("   Snapshot: {}", config.snapshot_path.display());
    for rate in config.rates.entries() {
        info!("   Tarifa: {} = {}/s", rate.service, rate.cost_per_second);
    }
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS permisivo en producción: define CORS_ORIGINS");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let (snapshot, snapshot_worker) =
        SnapshotPublisher::spawn(FileSnapshotStore::new(config.snapshot_path.clone()));
    let accrual_interval = config.accrual_interval;
    let app_state = AppState::new(config, Arc::new(snapshot));

    // Acumulación periódica de tarifas
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = AccrualScheduler::new(app_state.ledger.clone(), accrual_interval)
        .spawn(shutdown_rx);

    let app = create_app(app_state.clone());

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("   GET    /health");
    info!("   POST   /api/parking/sessions - Aparcar vehículo");
    info!("   GET    /api/parking/sessions - Vehículos aparcados");
    info!("   GET    /api/parking/sessions/:identifier - Consultar vehículo");
    info!("   DELETE /api/parking/sessions/:identifier - Pagar y salir");
    info!("   GET    /api/parking/spaces - Plazas disponibles");
    info!("   GET    /api/parking/rates - Tarifario");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

    let _ = shutdown_tx.send(true);
    if let Err(e) = scheduler.await {
        error!("❌ La tarea de acumulación terminó con error: {}", e);
    }

    // Soltar el último handle del ledger cierra el canal de snapshots
    drop(app_state);
    match tokio::time::timeout(Duration::from_secs(5), snapshot_worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("❌ La tarea de snapshots terminó con error: {}", e),
        Err(_) => warn!("⚠️ Último snapshot no escrito a tiempo"),
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
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
