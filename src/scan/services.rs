use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::meals::repo::NewMeal;
use crate::state::AppState;
use crate::vision::ImagePart;

use super::parser::{self, Extraction, NoRecordReason};
use super::prompt::{build_instruction, ScanMode};

pub const DEFAULT_GOAL: &str = "General Health";
pub const MAX_IMAGES: usize = 2;

#[derive(Debug)]
pub struct ScanRequest {
    pub images: Vec<ImagePart>,
    pub goal: String,
    /// `None` lets the image count decide.
    pub mode: Option<ScanMode>,
}

/// Runs one analysis and returns the report with the meal block cut out.
///
/// Input is validated before the model is called, so a rejected request never
/// costs an outbound call.
pub async fn analyze(st: &AppState, req: ScanRequest) -> Result<String, AppError> {
    if req.images.is_empty() {
        return Err(AppError::bad_request("No image uploaded"));
    }
    if req.images.len() > MAX_IMAGES {
        return Err(AppError::bad_request(format!(
            "At most {MAX_IMAGES} images can be uploaded"
        )));
    }
    let mode = req.mode.unwrap_or_else(|| ScanMode::infer(req.images.len()));
    match mode {
        ScanMode::Compare if req.images.len() < 2 => {
            return Err(AppError::bad_request("Compare mode needs two images"));
        }
        ScanMode::Single if req.images.len() > 1 => {
            return Err(AppError::bad_request("Single mode takes one image"));
        }
        _ => {}
    }

    let embed = st.config.embed_meal_data;
    let prompt = build_instruction(&req.goal, mode, embed);

    let raw = st
        .vision
        .generate(&prompt, &req.images)
        .await
        .map_err(AppError::Upstream)?;
    info!(?mode, images = req.images.len(), "analysis received");

    let cleaned = parser::clean_markup(&raw);
    match parser::extract(&cleaned) {
        Extraction::Parsed { prose, fragment } if embed => {
            let meal = st
                .store
                .insert_meal(NewMeal {
                    food_name: fragment.food_name,
                    calories: fragment.calories,
                    goal: req.goal,
                })
                .await?;
            info!(meal_id = %meal.id, food = %meal.food_name, "meal logged from analysis");
            Ok(prose)
        }
        Extraction::Parsed { prose, .. } => Ok(prose),
        Extraction::NoRecord { prose, reason } => {
            match reason {
                NoRecordReason::Absent if !embed => {}
                NoRecordReason::Absent => debug!("model returned no meal data block"),
                other => warn!(reason = %other, "meal data ignored"),
            }
            Ok(prose)
        }
    }
}
