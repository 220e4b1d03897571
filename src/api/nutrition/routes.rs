use crate::api::models::AppState;
use crate::api::nutrition::handlers::{intake_handler, lookup_handler};
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition/{label}", get(lookup_handler))
        .route("/intake", post(intake_handler))
}
