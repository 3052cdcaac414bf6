//! Decoding, cropping and re-encoding of the frames sent by the page.

use crate::geometry::CropBox;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, DynamicImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("no image data was provided")]
    Empty,
    #[error("the file must be an image (JPG, PNG, etc.), got {0}")]
    NotAnImage(String),
    #[error("only base64-encoded data URLs are supported")]
    NotBase64,
    #[error("image data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("image of {width}x{height} is too small to crop")]
    TooSmall { width: u32, height: u32 },
    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Returns the raw bytes behind a `data:` URL or a bare base64 string.
pub fn decode_data_url(input: &str) -> Result<Vec<u8>, ImageError> {
    let input = input.trim();
    let payload = match input.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or(ImageError::NotBase64)?;
            let mut parts = header.split(';');
            let mime = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
            if !mime.starts_with("image/") {
                return Err(ImageError::NotAnImage(if mime.is_empty() {
                    "an unknown type".to_string()
                } else {
                    mime
                }));
            }
            if !parts.any(|param| param.trim().eq_ignore_ascii_case("base64")) {
                return Err(ImageError::NotBase64);
            }
            payload
        }
        None => input,
    };

    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if payload.is_empty() {
        return Err(ImageError::Empty);
    }
    Ok(STANDARD.decode(payload)?)
}

pub fn decode_image(input: &str) -> Result<DynamicImage, ImageError> {
    let bytes = decode_data_url(input)?;
    image::load_from_memory(&bytes).map_err(ImageError::Decode)
}

pub fn crop_center_square(image: &DynamicImage, relative: f64) -> Result<DynamicImage, ImageError> {
    let (width, height) = (image.width(), image.height());
    let crop = CropBox::centered(width, height, relative).ok_or(ImageError::TooSmall { width, height })?;
    Ok(image.crop_imm(crop.x, crop.y, crop.size, crop.size))
}

/// Standard deviation of the grayscale intensities, 0 for an empty image.
pub fn texture_stddev(image: &DynamicImage) -> f64 {
    let gray = image.to_luma8();
    let count = gray.as_raw().len();
    if count == 0 {
        return 0.0;
    }

    let n = count as f64;
    let mean = gray.as_raw().iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = gray
        .as_raw()
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// A flat frame (plain wall, covered lens) has nothing worth classifying.
pub fn has_object(image: &DynamicImage, threshold: f64) -> bool {
    image.width() > 0 && image.height() > 0 && texture_stddev(image) >= threshold
}

pub fn encode_jpeg_data_url(image: &DynamicImage, quality: u8) -> Result<String, ImageError> {
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(ImageError::Encode)?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn checkerboard(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgb([250, 250, 250])
            } else {
                Rgb([10, 10, 10])
            }
        }))
    }

    fn png_base64(image: &DynamicImage) -> String {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        STANDARD.encode(bytes)
    }

    #[test]
    fn data_url_and_bare_base64_decode_the_same() {
        let encoded = png_base64(&checkerboard(8, 8));
        let from_url = decode_data_url(&format!("data:image/png;base64,{encoded}")).unwrap();
        let bare = decode_data_url(&encoded).unwrap();
        assert_eq!(from_url, bare);
    }

    #[test]
    fn non_image_data_url_is_rejected() {
        let err = decode_data_url("data:text/plain;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, ImageError::NotAnImage(ref mime) if mime == "text/plain"));
    }

    #[test]
    fn percent_encoded_data_url_is_rejected() {
        let err = decode_data_url("data:image/svg+xml,<svg/>").unwrap_err();
        assert!(matches!(err, ImageError::NotBase64));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(decode_data_url("   "), Err(ImageError::Empty)));
        assert!(matches!(decode_data_url("data:image/png;base64,"), Err(ImageError::Empty)));
    }

    #[test]
    fn garbage_bytes_fail_to_decode_as_image() {
        let err = decode_image(&STANDARD.encode(b"definitely not a picture")).unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    fn encoded_as(image: &DynamicImage, format: ImageFormat, mime: &str) -> String {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        format!("data:{mime};base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn gif_and_bmp_uploads_decode() {
        let rgba = DynamicImage::ImageRgba8(checkerboard(12, 8).to_rgba8());
        let gif = decode_image(&encoded_as(&rgba, ImageFormat::Gif, "image/gif")).unwrap();
        assert_eq!((gif.width(), gif.height()), (12, 8));

        let bmp = decode_image(&encoded_as(&checkerboard(12, 8), ImageFormat::Bmp, "image/bmp")).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (12, 8));
    }

    #[test]
    fn crop_takes_the_centered_square() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(640, 480));
        let cropped = crop_center_square(&image, 0.5).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (240, 240));
    }

    #[test]
    fn tiny_image_cannot_be_cropped() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(1, 1));
        assert!(matches!(
            crop_center_square(&image, 0.5),
            Err(ImageError::TooSmall { width: 1, height: 1 })
        ));
    }

    #[test]
    fn flat_frame_has_no_object() {
        let flat = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([120, 120, 120])));
        assert_eq!(texture_stddev(&flat), 0.0);
        assert!(!has_object(&flat, 8.0));
        assert!(has_object(&checkerboard(32, 32), 8.0));
    }

    #[test]
    fn jpeg_data_url_round_trips_dimensions() {
        let url = encode_jpeg_data_url(&checkerboard(48, 48), 90).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        let decoded = decode_image(&url).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 48));
    }
}
