use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptureSource {
    #[default]
    Camera,
    Upload,
}

impl CaptureSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Upload => "upload",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub image_base64: String,
    #[serde(default)]
    pub source: CaptureSource,
    /// Crop the centered square on the server instead of in the page.
    #[serde(default)]
    pub crop: bool,
}

/// Body sent to the inference endpoint.
#[derive(Debug, Serialize)]
pub struct UpstreamRequest<'a> {
    pub image_base64: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub seq: u64,
    pub time: String,
    pub recorded_at: String,
    pub source: CaptureSource,
    pub class: String,
    pub confidence: f64,
    /// Display percentage, formatted once so every view shows the same value.
    pub confidence_pct: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub class: String,
    pub confidence: f64,
    pub confidence_pct: String,
    pub label: String,
    pub confidence_text: String,
    pub hint: String,
    pub low_confidence: bool,
    pub entry: HistoryEntry,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub predict_url: String,
    pub predictions: usize,
}
