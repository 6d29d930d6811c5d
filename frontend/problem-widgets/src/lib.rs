use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod dom;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod utils;
pub mod widgets;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(middlewares::csrf::CSRF_HEADER_NAME),
        ])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/widgets/render", post(handlers::widgets::render_widget))
        .nest(
            "/semesters",
            semester_routes().layer(middleware::from_fn(middlewares::csrf::csrf_middleware)),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn semester_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/{semester_id}/problems/{problem_id}/validate_answer/",
            post(handlers::problems::validate_answer),
        )
        .route(
            "/{semester_id}/problems/{problem_id}/run_stdin/",
            post(handlers::problems::run_stdin),
        )
        .route(
            "/{semester_id}/generate_semester_code/",
            post(handlers::semesters::generate_semester_code),
        )
        .route("/{semester_id}/enroll/", post(handlers::semesters::enroll))
        .route(
            "/{semester_id}/change_target_points/",
            post(handlers::semesters::change_target_points),
        )
}
