use axum::http::Uri;

use crate::error::AppError;

pub mod contact;
pub mod dashboard;
pub mod github;
pub mod health;
pub mod wakatime;

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
