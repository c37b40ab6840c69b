//! Prometheus exposition endpoint.

use actix_web::{HttpResponse, web};
use prometheus::{Encoder, TextEncoder};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/metrics
pub async fn export(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&state.registry.gather(), &mut buffer)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer))
}
