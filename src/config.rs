/*
 * Stroke feature encoders (rust version)
 *
 * Converts raw pointer strokes into the fixed-length feature vectors
 * expected by the nearest-neighbour, random-forest and SVM gesture models.
 *
 * This software is distributed under the "New BSD License" agreement:
 *
 * Copyright (c) 2024, the stroke-features contributors. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted provided that the following conditions are met:
 *    * Redistributions of source code must retain the above copyright
 *      notice, this list of conditions and the following disclaimer.
 *    * Redistributions in binary form must reproduce the above copyright
 *      notice, this list of conditions and the following disclaimer in the
 *      documentation and/or other materials provided with the distribution.
 *    * Neither the names of the copyright holders nor the names of its
 *      contributors may be used to endorse or promote products derived from
 *      this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS
 * IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO,
 * THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
 * PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDERS OR
 * CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
 * EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT
 * OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
 * INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
 * OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
 * SUCH DAMAGE.
**/

//! Settings for the encoders and the prediction service.

use crate::{
    encoder::ModelKind,
    error::ConfigError,
    normalize::BoundingBox,
    padded_sequence_encoder::MAX_SEQUENCE_LENGTH,
    position_encoder::TARGET_NUM_POINTS,
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Overrides [`Settings::base_url`]
pub const ENV_BASE_URL: &str = "GESTURE_API_URL";
/// Overrides [`Settings::model`]
pub const ENV_MODEL: &str = "GESTURE_MODEL";

/// Shape of the feature vectors. Must match what the models were trained with.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EncoderConfig {
    /// Resampled points for the knn and rf encoders
    pub target_num_points: usize,
    /// Box the knn and rf encoders scale gestures into
    pub bounding_box: BoundingBox,
    /// Pairs kept by the svm encoder
    pub max_sequence_length: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            target_num_points: TARGET_NUM_POINTS,
            bounding_box: BoundingBox::default(),
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }
}

impl EncoderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_num_points < 2 {
            return Err(ConfigError::InvalidEncoder(format!(
                "target_num_points must be at least 2, got {}",
                self.target_num_points
            )));
        }
        let BoundingBox { width, height } = self.bounding_box;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::InvalidEncoder(format!(
                "bounding box must be positive, got {width}x{height}"
            )));
        }
        if self.max_sequence_length == 0 {
            return Err(ConfigError::InvalidEncoder(
                "max_sequence_length must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Settings {
    /// Root of the prediction service, without the endpoint path
    pub base_url: String,
    /// Model used when the caller does not pick one
    pub model: ModelKind,
    pub encoder: EncoderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: ModelKind::default(),
            encoder: EncoderConfig::default(),
        }
    }
}

impl Settings {
    /// Reads settings from a RON file. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let settings: Settings = ron::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults with the environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key/value source shaped like the environment
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.base_url.clone()));
        }
        self.encoder.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_trained_models() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.model, ModelKind::Knn);
        assert_eq!(settings.encoder.target_num_points, 16);
        assert_eq!(settings.encoder.bounding_box, BoundingBox::new(50.0, 40.0));
        assert_eq!(settings.encoder.max_sequence_length, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn overrides_replace_url_and_model() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://gestures.example"),
            (ENV_MODEL, "svm"),
        ]
        .into();
        let settings = Settings::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.base_url, "https://gestures.example");
        assert_eq!(settings.model, ModelKind::Svm);
    }

    #[test]
    fn bad_overrides_are_reported() {
        let err = Settings::default()
            .with_overrides(|key| (key == ENV_MODEL).then(|| "lstm".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidModel(_)));

        let err = Settings::default()
            .with_overrides(|key| {
                (key == ENV_BASE_URL).then(|| "localhost:8000".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn encoder_shape_is_validated() {
        let config = EncoderConfig {
            target_num_points: 1,
            ..Default::default()
        };
        assert!(
            matches!(config.validate(), Err(ConfigError::InvalidEncoder(_)))
        );

        let config = EncoderConfig {
            bounding_box: BoundingBox::new(0.0, 40.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_ron_settings_fall_back_to_defaults() {
        let text = r#"(
            base_url: "http://10.0.0.2:8000",
            model: rf,
            encoder: (target_num_points: 32),
        )"#;
        let settings: Settings = ron::from_str(text).unwrap();
        assert_eq!(settings.model, ModelKind::RandomForest);
        assert_eq!(settings.encoder.target_num_points, 32);
        assert_eq!(settings.encoder.max_sequence_length, 100);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bundled_settings_file_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/settings.ron");
        assert_eq!(Settings::load(path).unwrap(), Settings::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_settings_file_is_an_io_error() {
        let err = Settings::load("/nonexistent/gesture-settings.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
