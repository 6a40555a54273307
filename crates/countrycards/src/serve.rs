use crate::prelude::{eprintln, *};
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use countrycards_core::country::Country;
use countrycards_core::html::render_document;
use countrycards_core::view::{LoadFailure, Screen, ViewOptions, ViewState};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::countries::{client, load};

#[derive(Debug, clap::Args, Clone)]
pub struct ServeOptions {
    /// Host to bind to
    #[arg(long, env = "COUNTRY_CARDS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "COUNTRY_CARDS_PORT", default_value = "3000")]
    pub port: u16,
}

/// Shared state of the served view.
///
/// `view` is written once, by the load task.
#[derive(Clone)]
pub struct AppState {
    view: Arc<RwLock<ViewState>>,
    options: Arc<ViewOptions>,
    placeholder: Bytes,
    loading: Bytes,
}

impl AppState {
    pub fn new(options: ViewOptions) -> Result<Self> {
        Ok(Self {
            view: Arc::new(RwLock::new(ViewState::new())),
            options: Arc::new(options),
            placeholder: Bytes::from(crate::assets::placeholder_png()?),
            loading: Bytes::from(crate::assets::loading_gif()?),
        })
    }

    pub async fn screen(&self) -> Screen {
        self.view.read().await.screen(&self.options)
    }

    async fn settle(&self, outcome: Result<Vec<Country>, LoadFailure>) {
        let mut view = self.view.write().await;
        *view = std::mem::take(&mut *view).settle(outcome);
    }
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = f!("{}:{}", options.host, options.port);
    let state = AppState::new(global.view_options())?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    if global.verbose {
        eprintln!("Serving country cards on http://{}", addr);
        eprintln!("Fetching countries from {}", global.api_url);
    }
    log::info!("Listening on http://{addr}");

    let loader = spawn_load(state.clone(), client()?, global.api_url.clone());

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    // A fetch still in flight has no view left to update.
    loader.abort();

    Ok(())
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/state", get(state_handler))
        .route("/placeholder.png", get(placeholder_handler))
        .route("/loading.gif", get(loading_handler))
        .layer(cors)
        .with_state(state)
}

/// Run the one fetch of this view's lifetime in the background.
pub fn spawn_load(state: AppState, client: reqwest::Client, url: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = load(&client, &url).await;
        state.settle(outcome).await;
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_document(&state.screen().await))
}

async fn state_handler(State(state): State<AppState>) -> Json<Screen> {
    Json(state.screen().await)
}

async fn placeholder_handler(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], state.placeholder.clone())
}

async fn loading_handler(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/gif")], state.loading.clone())
}
