use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub analysis: String,
}
