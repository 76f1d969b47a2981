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

use crate::{
    config::EncoderConfig,
    error::{GestureError, ParseModelError},
    padded_sequence_encoder::PaddedSequenceEncoder,
    position_encoder::PositionEncoder,
    position_velocity_encoder::PositionVelocityEncoder,
    stroke::Stroke,
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::{fmt, ops::Deref, str::FromStr};

/// Flat, fixed-length classifier input.
/// Its length and slot order must match what the target model was trained on.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Turns a sealed stroke into the input of one particular model
pub trait FeatureEncoder {
    fn encode(&self, stroke: &Stroke) -> Result<FeatureVector, GestureError>;

    /// Length of every vector this encoder produces
    fn output_len(&self) -> usize;
}

/// The classifiers served by the prediction backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModelKind {
    /// Nearest neighbour on resampled positions
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "knn"))]
    Knn,
    /// Random forest on resampled positions and velocities
    #[cfg_attr(feature = "serde", serde(rename = "rf"))]
    RandomForest,
    /// SVM on the padded min-max normalized sequence
    #[cfg_attr(feature = "serde", serde(rename = "svm"))]
    Svm,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Knn, ModelKind::RandomForest, ModelKind::Svm];

    /// Path of the prediction endpoint, relative to the service root
    pub fn endpoint(self) -> &'static str {
        match self {
            ModelKind::Knn => "/predict",
            ModelKind::RandomForest => "/predict-rf",
            ModelKind::Svm => "/predict-svm",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Knn => "knn",
            ModelKind::RandomForest => "rf",
            ModelKind::Svm => "svm",
        }
    }

    pub fn encoder(self, config: &EncoderConfig) -> Box<dyn FeatureEncoder + Send + Sync> {
        match self {
            ModelKind::Knn => Box::new(PositionEncoder::new(
                config.target_num_points,
                config.bounding_box,
            )),
            ModelKind::RandomForest => Box::new(PositionVelocityEncoder::new(
                config.target_num_points,
                config.bounding_box,
            )),
            ModelKind::Svm => Box::new(PaddedSequenceEncoder::new(config.max_sequence_length)),
        }
    }

    pub fn encode(
        self,
        config: &EncoderConfig,
        stroke: &Stroke,
    ) -> Result<FeatureVector, GestureError> {
        self.encoder(config).encode(stroke)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knn" => Ok(ModelKind::Knn),
            "rf" => Ok(ModelKind::RandomForest),
            "svm" => Ok(ModelKind::Svm),
            _ => Err(ParseModelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::RawPoint;

    #[test]
    fn endpoints_differ_only_by_suffix() {
        assert_eq!(ModelKind::Knn.endpoint(), "/predict");
        assert_eq!(ModelKind::RandomForest.endpoint(), "/predict-rf");
        assert_eq!(ModelKind::Svm.endpoint(), "/predict-svm");
    }

    #[test]
    fn model_names_round_trip_through_parsing() {
        for model in ModelKind::ALL {
            assert_eq!(model.to_string().parse::<ModelKind>(), Ok(model));
        }
        assert_eq!(" RF ".parse::<ModelKind>(), Ok(ModelKind::RandomForest));
        assert_eq!(
            "lstm".parse::<ModelKind>(),
            Err(ParseModelError("lstm".to_string()))
        );
    }

    #[test]
    fn each_model_gets_its_own_vector_length() {
        let config = EncoderConfig::default();
        let stroke = Stroke::new(vec![
            RawPoint::new(0.0, 0.0, 0.0),
            RawPoint::new(10.0, 0.0, 0.1),
            RawPoint::new(10.0, 10.0, 0.2),
        ])
        .unwrap();
        assert_eq!(ModelKind::Knn.encode(&config, &stroke).unwrap().len(), 32);
        assert_eq!(
            ModelKind::RandomForest.encode(&config, &stroke).unwrap().len(),
            64
        );
        assert_eq!(ModelKind::Svm.encode(&config, &stroke).unwrap().len(), 200);
        for model in ModelKind::ALL {
            let encoder = model.encoder(&config);
            assert_eq!(encoder.encode(&stroke).unwrap().len(), encoder.output_len());
        }
    }
}
