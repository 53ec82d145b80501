use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Json, Router,
};
use log::{error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Settings;
use crate::error::{SearchError, StartupError};
use crate::model::Recipe;
use crate::providers::{http_client, SpoonacularProvider};
use crate::search::{search_recipes, SearchRequest};

pub const SEARCH_PATH: &str = "/api/recipes/search";

/// Immutable state shared by every request
pub struct AppState {
    pub settings: Settings,
    pub client: Client,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Arc<Self>, StartupError> {
        let client = http_client(&settings.spoonacular)?;
        Ok(Arc::new(Self { settings, client }))
    }
}

/// Query parameters of the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub ingredients: Option<String>,
    pub dietary: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            SEARCH_PATH,
            get(search_handler).fallback(method_not_allowed),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, SearchError> {
    let Query(params) = query.map_err(|e| SearchError::InvalidQuery(e.body_text()))?;

    let request =
        SearchRequest::from_params(params.ingredients.as_deref(), params.dietary.as_deref())?;

    let spoonacular = &state.settings.spoonacular;
    let api_key = spoonacular.resolve_api_key().ok_or_else(|| {
        error!("No Spoonacular API key configured");
        SearchError::MissingApiKey
    })?;

    let provider = SpoonacularProvider::new(state.client.clone(), spoonacular, api_key);
    let recipes = search_recipes(&provider, &request, spoonacular.result_limit).await?;

    info!("Returning {} recipes", recipes.len());
    Ok(Json(recipes))
}

async fn method_not_allowed() -> SearchError {
    SearchError::MethodNotAllowed
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(settings: Settings) -> Result<(), StartupError> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(settings)?;
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
