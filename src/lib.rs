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

//! Feature extraction for pointer gestures.
//!
//! A [`Stroke`] (pointer-down to pointer-up, timestamped samples) is turned
//! into the fixed-length vector one of three classifiers was trained on:
//!
//! - [`ModelKind::Knn`]: [`PositionEncoder`], the centered and scaled path
//!   resampled to 16 points evenly spaced by arc length (32 values).
//! - [`ModelKind::RandomForest`]: [`PositionVelocityEncoder`], the same path
//!   plus per-point velocities (64 values).
//! - [`ModelKind::Svm`]: [`PaddedSequenceEncoder`], the raw samples min-max
//!   normalized per axis, padded or truncated to 100 pairs (200 values).
//!
//! ```
//! use stroke_features::{FeatureEncoder, PositionEncoder, RawPoint, Stroke};
//!
//! let stroke = Stroke::new(vec![
//!     RawPoint::new(0.0, 0.0, 0.0),
//!     RawPoint::new(10.0, 0.0, 0.1),
//!     RawPoint::new(10.0, 10.0, 0.2),
//! ])?;
//! let features = PositionEncoder::default().encode(&stroke)?;
//! assert_eq!(features.len(), 32);
//! # Ok::<(), stroke_features::GestureError>(())
//! ```
//!
//! With the `client` feature, [`client::PredictionClient`] posts the vector
//! to the prediction service and [`GestureClassifier`] ties the steps together.

pub mod config;
pub mod effect;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod label;
pub mod normalize;
pub mod padded_sequence_encoder;
pub mod pipeline;
pub mod point;
pub mod position_encoder;
pub mod position_velocity_encoder;
pub mod resample;
pub mod stroke;

#[cfg(feature = "client")]
pub mod client;

pub use config::{EncoderConfig, Settings};
pub use effect::VisualEffect;
pub use encoder::{FeatureEncoder, FeatureVector, ModelKind};
pub use error::{ClassifyError, ConfigError, GestureError, PredictionError};
pub use label::GestureLabel;
pub use normalize::BoundingBox;
pub use padded_sequence_encoder::PaddedSequenceEncoder;
pub use pipeline::{GestureClassifier, Predictor};
pub use point::{Point, RawPoint};
pub use position_encoder::PositionEncoder;
pub use position_velocity_encoder::PositionVelocityEncoder;
pub use resample::ArcLengthResampler;
pub use stroke::{Stroke, StrokeRecorder, VelocitySample};
