//! HTTP server for the IBS site.
//!
//! This crate serves the site with axum:
//! - Page routes rendered by [`ibs_site::Site`], read through the render cache
//! - The contact form (`GET`/`POST /contact`)
//! - The revalidation webhook (`POST /api/revalidate`) called by the CMS
//!
//! # Quick Start
//!
//! ```ignore
//! use ibs_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         port: 3000,
//!         revalidate_secret: "s3cret".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (ibs-server)
//!                        │
//!                        ├─► Page handlers ──► RenderCache ──miss──► Site ──► Sanity
//!                        │
//!                        └─► Revalidation webhook ──► RenderCache::invalidate_*
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use ibs_cache::{MemoryCache, NullCache, RenderCache};
use ibs_content::{ImageUrlBuilder, SanityClient, SanityConfig};
use ibs_site::Site;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content repository connection.
    pub content: SanityConfig,
    /// Shared secret for the revalidation webhook (empty disables it).
    pub revalidate_secret: String,
    /// Cache rendered pages until revalidated.
    pub cache_enabled: bool,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            content: SanityConfig {
                project_id: "dm1tq9mh".to_owned(),
                dataset: "ibsdemo".to_owned(),
                api_version: "2023-05-03".to_owned(),
                use_cdn: true,
            },
            revalidate_secret: String::new(),
            cache_enabled: true,
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the templates fail to load or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let images = ImageUrlBuilder::new(&config.content.project_id, &config.content.dataset);
    let client = SanityClient::new(config.content.clone());
    let site = Site::new(Arc::new(client), images)?;

    let cache: Arc<dyn RenderCache> = if config.cache_enabled {
        Arc::new(MemoryCache::new())
    } else {
        Arc::new(NullCache)
    };

    if config.revalidate_secret.is_empty() {
        tracing::warn!("No revalidation secret configured; webhook calls will be rejected");
    }

    let state = Arc::new(AppState {
        site,
        cache,
        revalidate_secret: config.revalidate_secret.clone(),
        verbose: config.verbose,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        project = %config.content.project_id,
        dataset = %config.content.dataset,
        cache = config.cache_enabled,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the site configuration.
///
/// # Arguments
///
/// * `config` - Loaded site configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_config(
    config: &ibs_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content: SanityConfig {
            project_id: config.content.project_id.clone(),
            dataset: config.content.dataset.clone(),
            api_version: config.content.api_version.clone(),
            use_cdn: config.content.use_cdn,
        },
        revalidate_secret: config.revalidate.secret.clone(),
        cache_enabled: config.cache.enabled,
        verbose,
        version,
    }
}
