use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::ORIGIN},
};

use crate::{AppState, error::AppError, result::ApiResult};

use super::model::{ContactRequest, ContactResponse};

#[axum::debug_handler]
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResult<ContactResponse>>, AppError> {
    // 只接受来自本站的跨域提交
    if let Some(origin) = headers.get(ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        if !origin.starts_with(state.config.site_url.as_str()) {
            tracing::debug!("Rejected contact submission from origin {}", origin);
            return Err(AppError::InvalidOrigin);
        }
    }

    // 不要求 Content-Type，任何能解析为 JSON 的请求体都接受
    let req: ContactRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Invalid contact body: {}", e);
        AppError::Validation("Invalid request body".to_string())
    })?;

    let errors = req.validation_errors();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join(", ")));
    }

    tracing::info!(
        name = %req.name,
        email = %req.email,
        recipient = state.config.contact_email.as_deref().unwrap_or("-"),
        message_chars = req.message.chars().count(),
        "Contact form submission"
    );

    Ok(Json(ApiResult::success(ContactResponse {
        message: "Message received successfully".to_string(),
    })))
}
