use axum::Router;

pub mod batches;
pub mod common;
pub mod roster;
pub mod system;

/// Router for everything under `/batches`.
pub fn router() -> Router {
    Router::new().nest("/batches", batches::router().merge(roster::router()))
}
