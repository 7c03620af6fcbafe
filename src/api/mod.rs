//! HTTP surface of the analyzer

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;

pub use app::{create_app, serve};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
