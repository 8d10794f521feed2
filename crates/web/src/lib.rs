use std::time::Duration;

use axum::Router;
use storage::Store;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod docs;
pub mod error;
pub mod features;

/// Builds the full HTTP application around an already constructed store.
pub fn app(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(features::wins::routes::routes())
        .merge(features::leaderboard::routes::routes())
        .with_state(store)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
