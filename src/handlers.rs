use crate::config::Config;
use crate::errors::AppError;
use crate::imaging;
use crate::messages;
use crate::models::{HistoryResponse, PredictRequest, PredictResponse, StatusResponse};
use crate::state::AppState;
use crate::ui::{render_classify, render_index};
use axum::{extract::State, response::Html, Json};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn classify(State(state): State<AppState>) -> Html<String> {
    let history = state.history.lock().await;
    Html(render_classify(&state.config, history.entries()))
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let predictions = state.history.lock().await.len();
    Json(StatusResponse {
        message: messages::STATUS_MESSAGE,
        predict_url: state.classifier.endpoint().to_string(),
        predictions,
    })
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.history.lock().await;
    Json(HistoryResponse {
        entries: history.entries().to_vec(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let source = payload.source;
    let config = Arc::clone(&state.config);
    let image_base64 = tokio::task::spawn_blocking(move || {
        prepare_frame(&config, &payload.image_base64, payload.crop)
    })
    .await
    .map_err(AppError::internal)??;

    let prediction = state.classifier.predict(&image_base64).await?;
    info!(
        "prediction from {}: {} ({}%)",
        source.as_str(),
        prediction.class,
        messages::confidence_percent(prediction.confidence)
    );

    let entry = state.history.lock().await.record(source, &prediction);
    let text = messages::describe(&prediction, state.config.confidence_threshold);

    Ok(Json(PredictResponse {
        confidence_pct: entry.confidence_pct.clone(),
        class: prediction.class,
        confidence: prediction.confidence,
        label: text.label,
        confidence_text: text.confidence,
        hint: text.hint.to_string(),
        low_confidence: text.low_confidence,
        entry,
    }))
}

/// Decodes the submitted frame, optionally crops it, and re-encodes it as the
/// JPEG data URL the inference endpoint expects.
fn prepare_frame(config: &Config, image_base64: &str, crop: bool) -> Result<String, AppError> {
    let frame = imaging::decode_image(image_base64)?;
    let frame = if crop {
        imaging::crop_center_square(&frame, config.box_relative_size)?
    } else {
        frame
    };

    if !imaging::has_object(&frame, config.texture_threshold) {
        warn!("rejected a {}x{} frame without a clear object", frame.width(), frame.height());
        return Err(AppError::unprocessable(messages::NO_OBJECT));
    }

    Ok(imaging::encode_jpeg_data_url(&frame, config.jpeg_quality)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_data_url(image: RgbImage) -> String {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    fn striped(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            if (x / 3) % 2 == 0 { Rgb([230, 40, 40]) } else { Rgb([20, 20, 200]) }
        })
    }

    #[test]
    fn textured_frame_is_normalized_to_jpeg() {
        let url = prepare_frame(&Config::default(), &png_data_url(striped(40, 30)), false).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        let decoded = imaging::decode_image(&url).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn server_side_crop_produces_a_square() {
        let url = prepare_frame(&Config::default(), &png_data_url(striped(64, 40)), true).unwrap();
        let decoded = imaging::decode_image(&url).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 20));
    }

    #[test]
    fn flat_frame_is_unprocessable() {
        let flat = RgbImage::from_pixel(32, 32, Rgb([200, 200, 200]));
        let err = prepare_frame(&Config::default(), &png_data_url(flat), false).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, messages::NO_OBJECT);
    }

    #[test]
    fn gif_upload_is_normalized_to_jpeg() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(striped(40, 30)).to_rgba8())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Gif)
            .unwrap();
        let gif = format!("data:image/gif;base64,{}", STANDARD.encode(bytes));

        let url = prepare_frame(&Config::default(), &gif, false).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn non_image_payload_is_a_bad_request() {
        let err = prepare_frame(&Config::default(), "data:text/plain;base64,aGk=", false).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
