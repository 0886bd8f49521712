mod bookings;
pub mod catalog;
mod chat;
pub mod health;
pub mod metrics;

use axum::{Router, routing::post};

use crate::AppState;

/// Build the chat and booking routes
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::post))
        .route("/services/ambulance", post(bookings::ambulance))
        .route("/services/pharmacy", post(bookings::pharmacy))
        .route("/services/home-visit", post(bookings::home_visit))
}
