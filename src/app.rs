use crate::state::AppState;
use crate::{handlers, proxy};
use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/contributions", get(proxy::contributions))
        .route("/api/contributions/*rest", get(proxy::contributions_at))
        .layer(cors);

    Router::new()
        .route("/", get(handlers::index))
        .route("/widget/:username", get(handlers::widget))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
