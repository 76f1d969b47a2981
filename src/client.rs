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

//! HTTP client for the gesture prediction service.
//!
//! One POST per prediction, `{"points": [...]}` in, `{"prediction": "..."}`
//! out. No retries and no timeout: a failure is reported once and the
//! caller decides what to show.

use crate::{
    config::Settings,
    encoder::{FeatureVector, ModelKind},
    error::PredictionError,
    pipeline::Predictor,
};
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Serialize)]
struct PredictRequest<'a> {
    points: &'a [f64],
}

#[derive(Deserialize)]
struct PredictResponse {
    prediction: String,
}

#[derive(Clone, Debug)]
pub struct PredictionClient {
    http: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Reuses an existing reqwest client (connection pool, proxies, TLS setup)
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.base_url.as_str())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, model: ModelKind) -> String {
        format!("{}{}", self.base_url, model.endpoint())
    }

    /// Sends the vector to the endpoint of `model` and returns the predicted label name
    pub async fn predict(
        &self,
        model: ModelKind,
        features: &FeatureVector,
    ) -> Result<String, PredictionError> {
        let url = self.endpoint_url(model);
        debug!(%url, len = features.len(), "requesting prediction");

        let response = self
            .http
            .post(&url)
            .json(&PredictRequest {
                points: features.as_slice(),
            })
            .send()
            .await
            .map_err(|err| {
                warn!(%url, %err, "prediction request failed");
                PredictionError::Http(err)
            })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%url, %status, "prediction service returned an error");
            return Err(PredictionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: PredictResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(%url, %err, "could not decode prediction response");
            PredictionError::Decode(err.to_string())
        })?;
        Ok(decoded.prediction)
    }
}

impl Predictor for PredictionClient {
    async fn predict(
        &self,
        model: ModelKind,
        features: &FeatureVector,
    ) -> Result<String, PredictionError> {
        PredictionClient::predict(self, model, features).await
    }
}
