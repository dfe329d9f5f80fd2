//! Web server

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::info;
use verdap_core::{config::VerdapConfig, Error, Result};

use crate::backend::DirectoryBackend;
use crate::client::DirectoryClient;
use crate::web::{self, AppState};

pub struct WebServer {
    config: VerdapConfig,
}

impl WebServer {
    pub fn new(config: VerdapConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        let config = Arc::new(self.config);

        let backend = Arc::new(DirectoryBackend::new(config.clone()));
        let client = DirectoryClient::connect(
            backend,
            &config.client.bind_dn,
            &config.client.bind_password,
        )
        .map_err(|e| match e {
            Error::CredentialMismatch => Error::ConfigError(
                "configured client credentials were rejected by the directory".to_string(),
            ),
            other => other,
        })?;

        let state = AppState {
            client: Arc::new(client),
        };

        let app = Self::create_router(state);
        let addr = format!("{}:{}", config.web.bind_address, config.web.port);
        let listener = TcpListener::bind(&addr).await?;

        info!("verdap web front end listening on http://{}", addr);
        info!("directory base DN: {}", config.directory.base_dn);

        axum::serve(listener, app).await?;
        Ok(())
    }

    fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(web::index))
            .route("/stock", get(web::stock))
            .route("/fruit_or_veg", get(web::fruit_or_veg))
            .route("/item", get(web::item))
            .route("/raw", get(web::raw))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::default().include_headers(false)),
            )
            .with_state(state)
    }
}
