//! Preview handler: render text exactly as the printer would, as PNG.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::super::state::AppState;
use super::{ApiError, api_error};
use crate::text;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub text: String,
}

/// Handle POST /api/preview - render text as PNG (dark ink on white).
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PreviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let width = state.config.options.printer.print_width();
    let raster = text::render(&request.text, width, state.font.as_ref())
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    if raster.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Nothing to render"));
    }

    let png_bytes = raster.to_png_bytes().map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Preview render failed: {}", e),
        )
    })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
