use darshan_crowd::catalog::{self, Catalog};
use darshan_crowd::estimation::CrowdEstimator;
use darshan_crowd::{api, config, state};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::Level;

fn init_tracing(level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_default()?;
    init_tracing(config.log_level()?);
    tracing::info!(
        app = %config.app.name,
        config_path = config::DEFAULT_CONFIG_PATH,
        "darshan-crowd starting"
    );

    let catalog = load_catalog(&config);
    tracing::info!(
        temples = catalog.temples.len(),
        ids = ?catalog.temple_ids().collect::<Vec<_>>(),
        "Temple catalog ready"
    );

    let utc_offset = config.utc_offset()?;
    let state = Arc::new(state::AppState::new(
        CrowdEstimator::new(catalog),
        utc_offset,
    ));

    let app = api::router(state);
    let port = config.server_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, ?utc_offset, "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_catalog(config: &config::Config) -> Catalog {
    match config.catalog_path() {
        Some(path) => match catalog::load_catalog_from_path(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), "Temple catalog loaded");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load catalog, using built-in temples");
                Catalog::default()
            }
        },
        None => {
            tracing::info!("No catalog path configured, using built-in temples");
            Catalog::default()
        }
    }
}
