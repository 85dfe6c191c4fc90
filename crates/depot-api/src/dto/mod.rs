//! Request DTOs.

pub mod request;

use validator::Validate;

use depot_core::error::AppError;
use depot_core::result::AppResult;

/// Runs `validator` checks and maps failures to a `Validation` error.
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
