//! News site: public news items that logged-in users can comment on.

mod handlers;
mod seed;
mod templates;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use owned_content_axum::{Stores, auth_router_no_trace, respond_with_csrf_token};

pub use seed::seed_news;

/// The complete application, ready to serve.
pub fn app(stores: Stores) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/news/{id}/",
            get(handlers::detail).post(handlers::add_comment),
        )
        .route(
            "/edit_comment/{id}/",
            get(handlers::edit_form).post(handlers::edit),
        )
        .route(
            "/delete_comment/{id}/",
            get(handlers::delete_confirm)
                .post(handlers::delete_form)
                .delete(handlers::delete),
        )
        .nest("/auth", auth_router_no_trace())
        .layer(middleware::from_fn_with_state(
            stores.clone(),
            respond_with_csrf_token,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(stores)
}
