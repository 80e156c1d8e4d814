use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use folio_protocol::endpoints;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all Folio endpoints.
///
/// Every route is served both at the root and under `/api`.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let routes: Router<AppState> = Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(
            endpoints::POSTS,
            get(handler::list_posts).post(handler::create_post),
        )
        .route(endpoints::POST, get(handler::get_post))
        .route(endpoints::POST_BY_SLUG, get(handler::get_post_by_slug))
        .route(endpoints::BLOCKS, post(handler::add_block))
        .route(
            endpoints::BLOCK,
            put(handler::update_block).delete(handler::delete_block),
        )
        .route(endpoints::BLOCK_MOVE, put(handler::move_block));

    let app = Router::new()
        .merge(routes.clone())
        .nest(endpoints::API_PREFIX, routes)
        .layer(TraceLayer::new_for_http());

    let app = match cors_layer(cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    };
    app.with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
