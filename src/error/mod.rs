//! Error handling for the application.

mod app_error;

pub use app_error::{AppError, AppResult};
