//! HTTP server lifecycle: shared state from config, then the router.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use verbdrill_core::parser::load_preset_directory;
use verbdrill_core::{PresetCatalog, ReviewLedger, RoundEngine, RoundEngineConfig};

use crate::auth::AuthStore;
use crate::config::ServerConfig;
use crate::routes::{router, AppState};

/// Build the catalog, ledger, auth store, and engine described by `config`.
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let catalog = Arc::new(PresetCatalog::with_builtin());
    if let Some(dir) = &config.preset_dir {
        let presets = load_preset_directory(dir)
            .with_context(|| format!("failed to load presets from {}", dir.display()))?;
        tracing::info!("loaded {} preset(s) from {}", presets.len(), dir.display());
        catalog.extend(presets);
    }

    let auth = Arc::new(AuthStore::new(config.users.iter().cloned()));
    let engine = Arc::new(RoundEngine::new(
        catalog,
        Arc::new(ReviewLedger::new()),
        auth.clone(),
        RoundEngineConfig {
            max_round_len: config.max_round_len,
        },
    ));

    Ok(AppState {
        engine,
        auth,
        test_login: config.test_login,
    })
}

/// The full application: routes plus CORS and request tracing.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// A running server.
pub struct Server {
    addr: SocketAddr,
    state: AppState,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl Server {
    /// Bind to `config.bind` and start serving in the background.
    pub async fn start(config: &ServerConfig) -> Result<Self> {
        let state = build_state(config)?;
        let listener = TcpListener::bind(config.bind_addr()?)
            .await
            .with_context(|| format!("failed to bind {}", config.bind))?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let app = app(state.clone(), &config.cors_origins);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                tracing::error!("server error: {e}");
            }
        });

        tracing::info!("verbdrill listening on http://{addr}");

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle,
        })
    }

    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for requests against this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// Serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let server = Server::start(config).await?;
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    tracing::info!("shutting down");
    server.shutdown().await;
    Ok(())
}
