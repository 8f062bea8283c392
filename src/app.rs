use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/signin.html", get(handlers::signin_page))
        .route("/signup.html", get(handlers::signup_page))
        .route("/auth/signin", post(handlers::signin))
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/signout", post(handlers::signout))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/range", post(handlers::set_range))
        .route("/api/subjects", get(handlers::get_subjects))
        .with_state(state)
}
