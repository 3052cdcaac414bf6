use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_PREDICT_URL: &str = "https://ecovisionperu.onrender.com/predict";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an unparseable value {value:?}")]
    Unparseable { name: &'static str, value: String },
    #[error("{name} must be {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub predict_url: String,
    pub predict_timeout: Duration,
    /// Side of the crop square as a fraction of the frame's shorter edge.
    pub box_relative_size: f64,
    pub confidence_threshold: f64,
    /// Minimum grayscale standard deviation for a frame to count as non-empty.
    pub texture_threshold: f64,
    pub jpeg_quality: u8,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            predict_timeout: Duration::from_secs(30),
            box_relative_size: 0.5,
            confidence_threshold: 0.5,
            texture_threshold: 8.0,
            jpeg_quality: 90,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let predict_url = lookup("PREDICT_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.predict_url);
        let timeout_secs = parse_or(&lookup, "PREDICT_TIMEOUT_SECS", defaults.predict_timeout.as_secs())?;
        if timeout_secs == 0 {
            return Err(out_of_range("PREDICT_TIMEOUT_SECS", "at least 1", timeout_secs));
        }

        let box_relative_size = parse_or(&lookup, "BOX_RELATIVE_SIZE", defaults.box_relative_size)?;
        if !(box_relative_size > 0.0 && box_relative_size <= 1.0) {
            return Err(out_of_range("BOX_RELATIVE_SIZE", "within (0, 1]", box_relative_size));
        }

        let confidence_threshold =
            parse_or(&lookup, "CONFIDENCE_THRESHOLD", defaults.confidence_threshold)?;
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(out_of_range("CONFIDENCE_THRESHOLD", "within [0, 1]", confidence_threshold));
        }

        let texture_threshold = parse_or(&lookup, "TEXTURE_THRESHOLD", defaults.texture_threshold)?;
        if !(texture_threshold.is_finite() && texture_threshold >= 0.0) {
            return Err(out_of_range("TEXTURE_THRESHOLD", "a non-negative number", texture_threshold));
        }

        let jpeg_quality = parse_or(&lookup, "JPEG_QUALITY", defaults.jpeg_quality)?;
        if !(1..=100).contains(&jpeg_quality) {
            return Err(out_of_range("JPEG_QUALITY", "within 1..=100", jpeg_quality));
        }

        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?;
        if max_upload_bytes == 0 {
            return Err(out_of_range("MAX_UPLOAD_BYTES", "at least 1", max_upload_bytes));
        }

        Ok(Self {
            port,
            predict_url,
            predict_timeout: Duration::from_secs(timeout_secs),
            box_relative_size,
            confidence_threshold,
            texture_threshold,
            jpeg_quality,
            max_upload_bytes,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| ConfigError::Unparseable {
            name,
            value: raw,
        }),
        _ => Ok(default),
    }
}

fn out_of_range(name: &'static str, expected: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::OutOfRange {
        name,
        expected,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.predict_url, DEFAULT_PREDICT_URL);
        assert_eq!(config.box_relative_size, 0.5);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.predict_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("PREDICT_URL", " http://127.0.0.1:8000/predict "),
            ("BOX_RELATIVE_SIZE", "0.75"),
            ("CONFIDENCE_THRESHOLD", "0.6"),
            ("JPEG_QUALITY", "80"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.predict_url, "http://127.0.0.1:8000/predict");
        assert_eq!(config.box_relative_size, 0.75);
        assert_eq!(config.confidence_threshold, 0.6);
        assert_eq!(config.jpeg_quality, 80);
    }

    #[test]
    fn unparseable_value_names_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for (name, value) in [
            ("BOX_RELATIVE_SIZE", "0"),
            ("BOX_RELATIVE_SIZE", "1.5"),
            ("CONFIDENCE_THRESHOLD", "-0.1"),
            ("JPEG_QUALITY", "0"),
            ("TEXTURE_THRESHOLD", "-1"),
            ("PREDICT_TIMEOUT_SECS", "0"),
        ] {
            let result = Config::from_lookup(lookup_from(&[(name, value)]));
            assert!(
                matches!(result, Err(ConfigError::OutOfRange { .. })),
                "{name}={value} should be rejected"
            );
        }
    }
}
