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

//! Stroke in, label out.
//!
//! [`GestureClassifier`] is the whole job of a caller: check the stroke,
//! encode it for the active model, hand the vector to a [`Predictor`] and
//! interpret the answer. The predictor is injected so the same pipeline
//! runs against the HTTP service, a local model or a test double.

use crate::{
    config::EncoderConfig,
    encoder::{FeatureVector, ModelKind},
    error::{ClassifyError, GestureError, PredictionError},
    label::GestureLabel,
    stroke::Stroke,
};
use std::future::Future;
use tracing::{debug, info};

/// Something that maps a feature vector to a label name
pub trait Predictor {
    fn predict(
        &self,
        model: ModelKind,
        features: &FeatureVector,
    ) -> impl Future<Output = Result<String, PredictionError>> + Send;
}

pub struct GestureClassifier<P> {
    predictor: P,
    model: ModelKind,
    config: EncoderConfig,
}

impl<P: Predictor> GestureClassifier<P> {
    pub fn new(predictor: P, model: ModelKind, config: EncoderConfig) -> Self {
        Self {
            predictor,
            model,
            config,
        }
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn set_model(&mut self, model: ModelKind) {
        self.model = model;
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Encodes a finished stroke for the active model without predicting
    pub fn encode(&self, stroke: &Stroke) -> Result<FeatureVector, GestureError> {
        stroke.ensure_classifiable()?;
        self.model.encode(&self.config, stroke)
    }

    /// Invalid strokes never reach the predictor
    pub async fn classify(&self, stroke: &Stroke) -> Result<GestureLabel, ClassifyError> {
        let features = self.encode(stroke).map_err(|err| {
            debug!(model = %self.model, %err, "invalid gesture");
            err
        })?;
        let prediction = self.predictor.predict(self.model, &features).await?;
        let label = GestureLabel::parse(&prediction);
        info!(model = %self.model, %label, "gesture classified");
        Ok(label)
    }
}
