//! Upload Routes
//!
//! Profile photos and staff cards attached to registrations.

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use crate::core::ServerState;

enum UploadFileResponse {
    Ok(Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for UploadFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            UploadFileResponse::Ok(content) => (
                http::StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "image/jpeg"),
                    (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
                ],
                content,
            )
                .into_response(),
            UploadFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            UploadFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Names are `<sha256>.jpg`; anything else never resolves
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}

async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> UploadFileResponse {
    if !is_safe_filename(&filename) {
        return UploadFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.config.images_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => UploadFileResponse::Ok(content.into()),
        Err(e) => {
            tracing::debug!(file = %filename, error = %e, "Uploaded image not found");
            UploadFileResponse::NotFound
        }
    }
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/image/upload",
            post(handler::upload).layer(DefaultBodyLimit::max(handler::MAX_BODY_SIZE)),
        )
        .route("/api/image/{filename}", get(serve_uploaded_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_guard() {
        assert!(is_safe_filename("ab12.jpg"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("../secret"));
        assert!(!is_safe_filename("a/b.jpg"));
        assert!(!is_safe_filename("a\\b.jpg"));
    }
}
