//! Download handler — turns submitted plain text into a PDF attachment.

use axum::http::header;
use axum::response::IntoResponse;
use axum::Form;
use serde::Deserialize;

use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /download
///
/// Renders form field `text` into a paginated PDF and returns it as a
/// downloadable attachment.
pub async fn handle_download(
    Form(request): Form<DownloadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = super::render_pdf(&request.text)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"document.pdf\"",
            ),
        ],
        pdf,
    ))
}
