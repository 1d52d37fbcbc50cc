use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{self, create, delete, get as get_one, list, update};
use super::health::{health, health_detailed};
use super::AppState;
use crate::content::{Contacts, Events, Gallery, News};
use crate::model::RecordStore;

/// Largest accepted request body.
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the full application router over `state`.
pub fn router<S: RecordStore + 'static>(state: AppState<S>) -> Router {
    let api = Router::new()
        .route("/", get(handlers::index))
        .route("/events", get(list::<Events, S>).post(create::<Events, S>))
        .route("/events/upcoming/all", get(handlers::upcoming_events::<S>))
        .route(
            "/events/:id",
            get(get_one::<Events, S>)
                .put(update::<Events, S>)
                .delete(delete::<Events, S>),
        )
        .route("/news", get(list::<News, S>).post(create::<News, S>))
        .route(
            "/news/:id",
            get(get_one::<News, S>)
                .put(update::<News, S>)
                .delete(delete::<News, S>),
        )
        .route("/gallery", get(list::<Gallery, S>).post(create::<Gallery, S>))
        .route(
            "/gallery/:id",
            get(get_one::<Gallery, S>).delete(delete::<Gallery, S>),
        )
        .route(
            "/contact",
            post(handlers::submit_contact::<S>).get(handlers::list_private::<Contacts, S>),
        )
        .route(
            "/contact/:id",
            get(handlers::get_private::<Contacts, S>).delete(delete::<Contacts, S>),
        );

    Router::new()
        .route("/health", get(health::<S>))
        .route("/health/detailed", get(health_detailed::<S>))
        .nest("/api", api)
        .fallback(handlers::not_found::<S>)
        .method_not_allowed_fallback(handlers::method_not_allowed::<S>)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
