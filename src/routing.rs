//! Application router configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::{
    AppState,
    api::get_analysis,
    descriptive::get_descriptive_page,
    endpoints,
    exploratory::get_exploratory_page,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    upload::{clear_session_endpoint, get_home_page, upload_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let upload_routes = Router::new()
        .route(endpoints::UPLOAD, post(upload_endpoint))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes));

    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::DESCRIPTIVE_VIEW, get(get_descriptive_page))
        .route(endpoints::EXPLORATORY_VIEW, get(get_exploratory_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::CLEAR_SESSION, post(clear_session_endpoint))
        .route(endpoints::ANALYSIS_API, get(get_analysis))
        .merge(upload_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
