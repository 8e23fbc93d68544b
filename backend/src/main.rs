//! Backend entry-point: loads configuration, connects the stores, and runs
//! the HTTP server.

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::server::config::AppConfig;
use backend::server::{create_server, AppContext};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let context = AppContext::connect(&config)
        .await
        .map_err(std::io::Error::other)?;

    let (server, health_state) = create_server(&config, &context)?;
    health_state.mark_ready();
    info!(port = config.port, "server listening");
    server.await
}
