//! # Blog API Server
//!
//! actix-web surface over the post store: routes, state, configuration and
//! telemetry. The binary in `main.rs` only wires these together.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

use actix_web::web;

pub use config::AppConfig;
pub use state::AppState;

/// Register `state` and every route on an actix `App`.
///
/// ```ignore
/// App::new().configure(api_server::configure_app(state.clone()))
/// ```
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state));
        handlers::configure_routes(cfg);
    }
}
