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

use thiserror::Error;

/// Reasons a stroke cannot be turned into a feature vector.
///
/// These are expected outcomes of normal drawing (a click, a tremor, a
/// stroke that never moved) and should be reported to the user as an
/// invalid gesture, never forwarded to the prediction service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("stroke has {found} points, at least {required} are required")]
    TooFewPoints { found: usize, required: usize },

    #[error("stroke has no movement (total path length is zero)")]
    NoMovement,

    #[error("insufficient points to interpolate: {found} unique arc-length samples")]
    InsufficientUniqueSamples { found: usize },

    #[error("arc-length positions ({positions}) and values ({values}) differ in length")]
    LengthMismatch { positions: usize, values: usize },

    #[error("cannot resample to {0} points, at least 2 are required")]
    InvalidTargetCount(usize),
}

impl GestureError {
    /// True for the failures caused by the stroke itself rather than by a
    /// misconfigured encoder.
    pub fn is_invalid_gesture(&self) -> bool {
        matches!(
            self,
            GestureError::TooFewPoints { .. }
                | GestureError::NoMovement
                | GestureError::InsufficientUniqueSamples { .. }
        )
    }
}

/// Failure talking to the remote prediction service.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[cfg(feature = "client")]
    #[error("request to prediction service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("prediction service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed prediction response: {0}")]
    Decode(String),
}

/// Outcome of classifying a stroke end to end.
///
/// The two variants drive different user-facing messages, so callers must
/// keep them apart.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid gesture: {0}")]
    InvalidGesture(#[from] GestureError),

    #[error("prediction error: {0}")]
    Prediction(#[from] PredictionError),
}

impl ClassifyError {
    pub fn is_invalid_gesture(&self) -> bool {
        matches!(self, ClassifyError::InvalidGesture(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ClassifyError::Prediction(_))
    }

    /// Message shown to the person drawing.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClassifyError::InvalidGesture(_) => {
                "Invalid gesture. Not enough data points or no movement."
            }
            ClassifyError::Prediction(_) => "Error during prediction. Check console for details.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown model `{0}`, expected one of: knn, rf, svm")]
pub struct ParseModelError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid base url `{0}`, expected an http:// or https:// url")]
    InvalidUrl(String),

    #[error(transparent)]
    InvalidModel(#[from] ParseModelError),

    #[error("invalid encoder settings: {0}")]
    InvalidEncoder(String),
}
