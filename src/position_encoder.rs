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
    encoder::{FeatureEncoder, FeatureVector},
    error::GestureError,
    geometry,
    normalize::{self, BoundingBox},
    resample::ArcLengthResampler,
    stroke::Stroke,
};
use tracing::debug;

/// Default number of points on the resampled path
pub const TARGET_NUM_POINTS: usize = 16;

/// Nearest-neighbour input: the centered, scaled path resampled to
/// `target_num_points` points evenly spaced by arc length, flattened
/// as `[x1, y1, x2, y2, ...]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionEncoder {
    pub target_num_points: usize,
    pub bounding_box: BoundingBox,
}

impl PositionEncoder {
    pub fn new(target_num_points: usize, bounding_box: BoundingBox) -> Self {
        Self {
            target_num_points,
            bounding_box,
        }
    }
}

impl Default for PositionEncoder {
    fn default() -> Self {
        Self::new(TARGET_NUM_POINTS, BoundingBox::default())
    }
}

impl FeatureEncoder for PositionEncoder {
    fn encode(&self, stroke: &Stroke) -> Result<FeatureVector, GestureError> {
        if stroke.len() < 2 {
            return Err(GestureError::TooFewPoints {
                found: stroke.len(),
                required: 2,
            });
        }

        let scaled = normalize::center_and_scale(&stroke.positions(), self.bounding_box).points;
        let cumulative = geometry::cumulative_arc_length(&scaled);
        let total = cumulative.last().copied().unwrap_or(0.0);
        if total == 0.0 {
            debug!(points = stroke.len(), "rejecting stroke without movement");
            return Err(GestureError::NoMovement);
        }

        let resampler = ArcLengthResampler::new(&cumulative, self.target_num_points)?;
        let xs: Vec<f64> = scaled.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = scaled.iter().map(|p| p.y).collect();
        let xs = resampler.resample(&xs)?;
        let ys = resampler.resample(&ys)?;

        let mut features = Vec::with_capacity(self.output_len());
        for (x, y) in xs.into_iter().zip(ys) {
            features.push(x);
            features.push(y);
        }
        debug!(
            points = stroke.len(),
            len = features.len(),
            "encoded positions"
        );
        Ok(features.into())
    }

    fn output_len(&self) -> usize {
        2 * self.target_num_points
    }
}
