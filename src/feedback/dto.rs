use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub note: Option<String>,
}
