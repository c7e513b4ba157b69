//! Maps crate-level errors to skyboard_core::AppError for consistent user-facing messages.
//! Each source crate has its own module to keep mappings small and readable.

mod auth;
mod weather;

use skyboard_core::AppError;

/// Conversion into the application error hierarchy.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
