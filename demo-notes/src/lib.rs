//! Notes site: every user keeps private notes addressed by slug.

mod handlers;
mod templates;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use owned_content_axum::{Stores, auth_router_no_trace, respond_with_csrf_token};

pub fn app(stores: Stores) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/notes/", get(handlers::list))
        .route("/add/", get(handlers::add_form).post(handlers::add))
        .route("/done/", get(handlers::done))
        .route("/note/{slug}/", get(handlers::detail))
        .route(
            "/edit/{slug}/",
            get(handlers::edit_form).post(handlers::edit),
        )
        .route(
            "/delete/{slug}/",
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
