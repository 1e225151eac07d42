//! Backend entry point: loads settings, wires storage and serves the API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ewaste_backend::inbound::http::health::HealthState;
use ewaste_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use ewaste_backend::outbound::persistence::{DbPool, PoolConfig};
use ewaste_backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let mut config =
        ServerConfig::new(session, bind_addr).with_seed_defaults(settings.seed_defaults);
    if let Some(url) = settings.database_url() {
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "e-waste backend listening");
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<actix_web_prom::PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("ewaste")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(err) => {
            warn!(error = %err, "Prometheus metrics disabled");
            None
        }
    }
}
