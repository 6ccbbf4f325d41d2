use crate::error::{ AppError, AppResult };
use crate::models::chat::ChatRequest;
use crate::relay::BackendClient;
use axum::{
    routing::post,
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, warn };

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
}

/// Builds the relay router: `POST /api/chat` behind a permissive CORS layer
/// so the browser UI can call it from another origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected malformed chat request: {}", rejection.body_text());
        AppError::InvalidRequest(rejection.body_text())
    })?;

    info!("Received request from frontend: {}", request.message);

    match state.backend.forward(&request).await {
        Ok(data) => Ok(Json(data)),
        Err(e) => {
            e.log(state.backend.chat_url());
            Err(e.into())
        }
    }
}
