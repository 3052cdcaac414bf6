//! Wording shown in the result panel.

use crate::models::Prediction;

pub const IDLE_LABEL: &str = "No predictions yet.";
pub const IDLE_DETAIL: &str = "Capture an object to see its estimated plastic type.";
pub const IDLE_HINT: &str = "Make sure the object fills as much of the frame as possible.";

pub const LOADING_LABEL: &str = "Classifying...";
pub const LOADING_DETAIL: &str = "Running the image through the plastic classifier.";

pub const ERROR_LABEL: &str = "Could not reach the classifier.";
pub const REJECTED_LABEL: &str = "The image was not accepted.";
pub const ERROR_HINT: &str = "Check that the inference service is running and try again.";

pub const LOW_CONFIDENCE_HINT: &str =
    "Low confidence. Move the object closer and avoid busy backgrounds.";
pub const STABLE_HINT: &str = "Stable prediction. Capture another object to compare results.";

pub const NO_OBJECT: &str = "No clear object detected in the frame. Adjust it and capture again.";

pub const STATUS_MESSAGE: &str = "EcoVision front end is running";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultText {
    pub label: String,
    pub confidence: String,
    pub hint: &'static str,
    pub low_confidence: bool,
}

pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}", confidence * 100.0)
}

pub fn describe(prediction: &Prediction, threshold: f64) -> ResultText {
    let low_confidence = prediction.confidence < threshold;
    ResultText {
        label: format!("Class: {}", prediction.class),
        confidence: format!("Confidence: {}%", confidence_percent(prediction.confidence)),
        hint: if low_confidence { LOW_CONFIDENCE_HINT } else { STABLE_HINT },
        low_confidence,
    }
}
