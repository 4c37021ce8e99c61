//! `ImposterServer` builder and serve loop.
//!
//! This is the entry point for running the game backend. It ties the
//! layers together: catalog → word allocator → session store → game
//! service → HTTP router.

use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use imposter_game::GameService;
use imposter_protocol::ErrorBody;
use imposter_session::SessionStore;
use imposter_words::Catalog;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::INTERNAL_ERROR_MESSAGE;
use crate::handler;
use crate::{ConfigError, ImposterError, ServerConfig};

/// Builds the HTTP router for `service`.
///
/// Browser requests are only allowed from `cors_origins`. Unknown routes
/// get a JSON 404; a panicking handler gets a generic 500.
pub fn router(service: Arc<GameService>, cors_origins: &[String]) -> Result<Router, ConfigError> {
    Ok(Router::new()
        .route("/health", get(handler::health))
        .route("/categories", get(handler::list_categories))
        .route("/games", post(handler::create_game))
        .route("/games/{id}/reveal", post(handler::reveal))
        .route("/games/{id}/solution", get(handler::solution))
        .fallback(handler::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(service))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidValue {
                key: "CORS_ORIGINS",
                value: origin.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "request handler panicked");

    let body = ErrorBody {
        error: INTERNAL_ERROR_MESSAGE.to_string(),
        kind: Some("Internal".to_string()),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Builder for configuring and starting the server.
///
/// # Example
///
/// ```rust,ignore
/// use imposter::prelude::*;
///
/// let server = ImposterServer::builder()
///     .config(ServerConfig::from_env()?)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct ImposterServerBuilder {
    config: ServerConfig,
    catalog: Option<Catalog>,
}

impl ImposterServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            catalog: None,
        }
    }

    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `catalog` instead of loading one from the configuration.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Loads the catalog, wires up the game service, and binds the
    /// listener. Nothing is served until [`ImposterServer::run`].
    ///
    /// Without an explicit catalog, `config.catalog_path` is loaded if set,
    /// otherwise the embedded catalog.
    pub async fn build(self) -> Result<ImposterServer, ImposterError> {
        let catalog = match (self.catalog, &self.config.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => Catalog::from_path(path)?,
            (None, None) => Catalog::builtin()?,
        };

        let sessions = Arc::new(SessionStore::new(self.config.store.clone()));
        let service = Arc::new(GameService::new(
            Arc::new(catalog),
            sessions,
            self.config.service_config(),
        ));
        let router = router(Arc::clone(&service), &self.config.cors_origins)?;
        let listener = TcpListener::bind(self.config.bind_addr()).await?;

        Ok(ImposterServer {
            listener,
            service,
            router,
        })
    }
}

impl Default for ImposterServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound, not yet serving, game server.
///
/// Call [`run()`](Self::run) to start accepting requests.
pub struct ImposterServer {
    listener: TcpListener,
    service: Arc<GameService>,
    router: Router,
}

impl ImposterServer {
    /// Creates a new builder.
    pub fn builder() -> ImposterServerBuilder {
        ImposterServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn service(&self) -> &Arc<GameService> {
        &self.service
    }

    /// Serves until Ctrl-C.
    pub async fn run(self) -> Result<(), ImposterError> {
        self.run_until(ctrl_c()).await
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    ///
    /// The expiry sweeper runs for as long as the server does.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ImposterError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let sweeper = self.service.sessions().spawn_sweeper();
        tracing::debug!(addr = ?self.listener.local_addr().ok(), "sweeper started, serving requests");

        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await;

        sweeper.abort();
        tracing::info!("imposter server stopped");
        Ok(result?)
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
