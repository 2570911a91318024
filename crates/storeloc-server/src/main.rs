mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use storeloc_core::AppConfig;
use storeloc_geocode::NominatimClient;
use storeloc_search::{
    EngineConfig, InMemoryStoreRepository, SearchOrchestrator, StoreRepository,
    WeeklyHoursEvaluator,
};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(storeloc_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let repository = build_repository(&config).await?;
    let provider = NominatimClient::with_base_url(
        &config.geocoder_base_url,
        config.geocoder_timeout_secs,
        &config.geocoder_user_agent,
    )?;
    let engine = Arc::new(SearchOrchestrator::build(
        &EngineConfig::from_app_config(&config),
        Arc::new(provider),
        repository,
        Arc::new(WeeklyHoursEvaluator::utc()),
    ));

    let _scheduler =
        scheduler::build_scheduler(Arc::clone(&engine), &config.cache_sweep_cron).await?;

    let app = build_app(AppState { engine });

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "storeloc-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Postgres when `DATABASE_URL` is set, otherwise the YAML store catalog.
async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn StoreRepository>> {
    if config.database_url.is_some() {
        let pool = storeloc_db::connect_pool_from_config(config).await?;
        let applied = storeloc_db::run_migrations(&pool).await?;
        tracing::info!(applied, "using postgres store repository");
        Ok(Arc::new(storeloc_db::PgStoreRepository::new(pool)))
    } else {
        let catalog = storeloc_core::load_store_catalog(&config.stores_path)?;
        tracing::info!(
            path = %config.stores_path.display(),
            stores = catalog.stores.len(),
            "using in-memory store catalog"
        );
        Ok(Arc::new(InMemoryStoreRepository::new(catalog.stores)))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
