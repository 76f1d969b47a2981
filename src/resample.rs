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

use crate::error::GestureError;

/// `count` positions evenly spaced from 0 to `total` inclusive
pub fn target_positions(total: f64, count: usize) -> Result<Vec<f64>, GestureError> {
    if count < 2 {
        return Err(GestureError::InvalidTargetCount(count));
    }
    let step = total / (count as f64 - 1.0);
    Ok((0..count).map(|i| i as f64 * step).collect())
}

/// Resamples per-vertex quantities of a polyline at evenly spaced
/// arc-length positions.
///
/// The bracketing segment and interpolation ratio of every target position
/// are computed once, so all channels (x, y, vx, vy...) resampled through
/// the same resampler stay aligned on the same points of the path.
#[derive(Clone, Debug)]
pub struct ArcLengthResampler {
    /// (segment start index, ratio within the segment) per target position
    segments: Vec<(usize, f64)>,
    vertices: usize,
}

impl ArcLengthResampler {
    /// `cumulative` must start at 0, be non-decreasing and cover a non-zero length
    pub fn new(cumulative: &[f64], count: usize) -> Result<Self, GestureError> {
        if cumulative.len() < 2 {
            return Err(GestureError::InsufficientUniqueSamples {
                found: cumulative.len(),
            });
        }
        let last = cumulative.len() - 1;
        let total = cumulative[last];
        if total <= cumulative[0] {
            return Err(GestureError::NoMovement);
        }

        let targets = target_positions(total, count)?;
        let mut segments = Vec::with_capacity(count);
        let mut i = 0;
        for target in targets {
            // targets are increasing, so the scan resumes where the previous one stopped
            while i + 1 < last && cumulative[i + 1] <= target {
                i += 1;
            }
            let length = cumulative[i + 1] - cumulative[i];
            let ratio = if length > 0.0 {
                (target - cumulative[i]) / length
            } else {
                0.0
            };
            segments.push((i, ratio));
        }

        Ok(Self {
            segments,
            vertices: cumulative.len(),
        })
    }

    /// Number of output samples per channel
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Interpolates one channel. `values` holds one entry per polyline vertex.
    pub fn resample(&self, values: &[f64]) -> Result<Vec<f64>, GestureError> {
        if values.len() != self.vertices {
            return Err(GestureError::LengthMismatch {
                positions: self.vertices,
                values: values.len(),
            });
        }
        Ok(self
            .segments
            .iter()
            .map(|&(i, ratio)| values[i] + ratio * (values[i + 1] - values[i]))
            .collect())
    }
}

/// One-shot form of [`ArcLengthResampler`] for a single channel
pub fn resample(
    cumulative: &[f64],
    values: &[f64],
    count: usize,
) -> Result<Vec<f64>, GestureError> {
    ArcLengthResampler::new(cumulative, count)?.resample(values)
}
