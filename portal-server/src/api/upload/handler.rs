//! Image Upload Handler
//!
//! Accepts PNG, JPEG and WebP, re-encodes to JPEG and stores the result under
//! its content hash, so the same picture uploaded twice lands on one file.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};
use shared::{AppError, AppResult, ErrorCode};
use std::io::Cursor;
use std::path::PathBuf;

use crate::core::ServerState;

/// Maximum image size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Request body cap; multipart framing on top of the image
pub const MAX_BODY_SIZE: usize = MAX_FILE_SIZE + 64 * 1024;

const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub format: &'static str,
    pub url: String,
    /// True when identical content was already stored
    pub deduplicated: bool,
}

fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn validate_image(data: &[u8], ext: &str) -> AppResult<()> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            ),
        ));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::InvalidFileExtension,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext_lower,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }
    Ok(())
}

/// Decode and re-encode as JPEG
fn compress_image(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::ImageProcessingFailed, format!("Invalid image: {}", e))
    })?;

    let mut buffer = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
    img.to_rgb8().write_with_encoder(encoder).map_err(|e| {
        AppError::with_message(
            ErrorCode::ImageProcessingFailed,
            format!("Failed to compress image: {}", e),
        )
    })?;
    Ok(buffer)
}

/// POST /api/image/upload (multipart field `file`)
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() == Some("file") {
            original_filename = field.file_name().map(|s| s.to_string());
            field_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'file' field found. Field name must be 'file'"))?;
    let original_name = original_filename.ok_or_else(|| AppError::new(ErrorCode::NoFilename))?;
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    let ext = PathBuf::from(&original_name)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| {
            AppError::new(ErrorCode::InvalidFileExtension).with_detail("filename", original_name.clone())
        })?;

    validate_image(&data, &ext)?;
    let compressed = tokio::task::spawn_blocking(move || compress_image(&data))
        .await
        .map_err(|e| AppError::internal(format!("Image task failed: {}", e)))??;

    let file_id = calculate_hash(&compressed);
    let filename = format!("{}.jpg", file_id);
    let images_dir = state.config.images_dir();
    let file_path = images_dir.join(&filename);

    let deduplicated = tokio::fs::try_exists(&file_path).await.unwrap_or(false);
    if deduplicated {
        tracing::info!(original_name = %original_name, file = %filename, "Duplicate image, reusing stored file");
    } else {
        let storage_err = |e: std::io::Error| {
            AppError::with_message(ErrorCode::FileStorageFailed, format!("Failed to save file: {}", e))
        };
        tokio::fs::create_dir_all(&images_dir).await.map_err(storage_err)?;
        tokio::fs::write(&file_path, &compressed).await.map_err(storage_err)?;
        tracing::info!(
            original_name = %original_name,
            size = compressed.len(),
            file = %filename,
            "Image uploaded"
        );
    }

    Ok(Json(UploadResponse {
        url: format!("/api/image/{}", filename),
        file_id,
        filename,
        original_name,
        size: compressed.len(),
        format: "jpg",
        deduplicated,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 30, 30]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_image(b"x", "PNG").is_ok());
        let err = validate_image(b"x", "gif").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFileExtension);
    }

    #[test]
    fn test_validate_size() {
        let big = vec![0u8; MAX_FILE_SIZE + 1];
        assert_eq!(validate_image(&big, "jpg").unwrap_err().code, ErrorCode::FileTooLarge);
    }

    #[test]
    fn test_compress_is_deterministic() {
        let a = compress_image(&png_bytes()).unwrap();
        let b = compress_image(&png_bytes()).unwrap();
        assert_eq!(calculate_hash(&a), calculate_hash(&b));
        assert_eq!(&a[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_compress_rejects_garbage() {
        let err = compress_image(b"not an image").unwrap_err();
        assert_eq!(err.code, ErrorCode::ImageProcessingFailed);
    }
}
