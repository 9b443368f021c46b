use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{error::AppError, state::AppState, vision::ImagePart};

use super::dto::ScanResponse;
use super::prompt::ScanMode;
use super::services::{self, ScanRequest, DEFAULT_GOAL};

pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/scan-food", post(scan_food))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// POST /api/scan-food (multipart)
/// Fields: foodImage (one or two files), userGoal, optional mode=single|compare.
#[instrument(skip(state, mp))]
pub async fn scan_food(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<ScanResponse>, AppError> {
    let req = read_scan_form(&mut mp).await?;
    let analysis = services::analyze(&state, req).await?;
    Ok(Json(ScanResponse { analysis }))
}

async fn read_scan_form(mp: &mut Multipart) -> Result<ScanRequest, AppError> {
    let mut images = Vec::new();
    let mut goal: Option<String> = None;
    let mut mode: Option<ScanMode> = None;

    while let Some(field) = mp.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "foodImage" | "foodImage[]" | "image" => {
                let mime_type = field.content_type().unwrap_or("image/jpeg").to_string();
                if !is_supported_image(&mime_type) {
                    return Err(AppError::bad_request(format!(
                        "Unsupported image type: {mime_type}"
                    )));
                }
                let data = field.bytes().await.map_err(malformed)?;
                if data.is_empty() {
                    continue;
                }
                images.push(ImagePart { mime_type, data });
            }
            "userGoal" | "goal" => goal = Some(field.text().await.map_err(malformed)?),
            "mode" => {
                let value = field.text().await.map_err(malformed)?;
                mode = Some(ScanMode::parse(&value).ok_or_else(|| {
                    AppError::bad_request(format!("Unknown mode: {}", value.trim()))
                })?);
            }
            _ => {}
        }
    }

    let goal = goal
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| DEFAULT_GOAL.to_string());

    Ok(ScanRequest { images, goal, mode })
}

fn malformed(e: MultipartError) -> AppError {
    match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(format!("Upload too large: {e}")),
        _ => AppError::bad_request(format!("Invalid upload: {e}")),
    }
}

fn is_supported_image(ct: &str) -> bool {
    matches!(
        ct,
        "image/jpeg" | "image/jpg" | "image/png" | "image/webp" | "image/heic" | "image/heif"
    )
}
