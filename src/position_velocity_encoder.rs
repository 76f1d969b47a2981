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
    position_encoder::TARGET_NUM_POINTS,
    resample::ArcLengthResampler,
    stroke::Stroke,
};
use tracing::debug;

/// Random-forest input: resampled positions and velocities, flattened as
/// `[x1, y1, vx1, vy1, x2, y2, vx2, vy2, ...]`.
///
/// Velocities come from the raw samples and are not rescaled with the
/// geometry. Samples that add no path length are dropped (with their
/// velocity) before resampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionVelocityEncoder {
    pub target_num_points: usize,
    pub bounding_box: BoundingBox,
}

impl PositionVelocityEncoder {
    pub fn new(target_num_points: usize, bounding_box: BoundingBox) -> Self {
        Self {
            target_num_points,
            bounding_box,
        }
    }
}

impl Default for PositionVelocityEncoder {
    fn default() -> Self {
        Self::new(TARGET_NUM_POINTS, BoundingBox::default())
    }
}

impl FeatureEncoder for PositionVelocityEncoder {
    fn encode(&self, stroke: &Stroke) -> Result<FeatureVector, GestureError> {
        if stroke.len() < 2 {
            return Err(GestureError::TooFewPoints {
                found: stroke.len(),
                required: 2,
            });
        }

        let velocities = stroke.velocities();
        let scaled = normalize::center_and_scale(&stroke.positions(), self.bounding_box).points;
        let cumulative = geometry::cumulative_arc_length(&scaled);

        let unique = geometry::unique_arc_length_indices(&cumulative);
        if unique.len() < 2 {
            debug!(
                points = stroke.len(),
                unique = unique.len(),
                "insufficient points to interpolate"
            );
            return Err(GestureError::InsufficientUniqueSamples {
                found: unique.len(),
            });
        }

        // every channel keeps the same retained vertices
        let pick = |values: Vec<f64>| -> Vec<f64> { unique.iter().map(|&i| values[i]).collect() };
        let resampler = ArcLengthResampler::new(&pick(cumulative), self.target_num_points)?;
        let xs = resampler.resample(&pick(scaled.iter().map(|p| p.x).collect()))?;
        let ys = resampler.resample(&pick(scaled.iter().map(|p| p.y).collect()))?;
        let vxs = resampler.resample(&pick(velocities.iter().map(|v| v.vx).collect()))?;
        let vys = resampler.resample(&pick(velocities.iter().map(|v| v.vy).collect()))?;

        let mut features = Vec::with_capacity(self.output_len());
        for i in 0..resampler.len() {
            features.extend_from_slice(&[xs[i], ys[i], vxs[i], vys[i]]);
        }
        debug!(
            points = stroke.len(),
            unique = unique.len(),
            len = features.len(),
            "encoded positions and velocities"
        );
        Ok(features.into())
    }

    fn output_len(&self) -> usize {
        4 * self.target_num_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::RawPoint;

    fn stroke(points: &[(f64, f64, f64)]) -> Stroke {
        Stroke::new(
            points
                .iter()
                .map(|&(x, y, t)| RawPoint::new(x, y, t))
                .collect(),
        )
        .unwrap()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn l_shape_interleaves_positions_and_velocities() {
        let encoder = PositionVelocityEncoder::new(4, BoundingBox::default());
        let features = encoder
            .encode(&stroke(&[
                (0.0, 0.0, 0.0),
                (10.0, 0.0, 0.1),
                (10.0, 10.0, 0.2),
            ]))
            .unwrap();
        let third = 100.0 / 3.0;
        #[rustfmt::skip]
        let expected = [
            -20.0, -10.0, 0.0, 0.0,
            0.0, -10.0, 2.0 * third, 0.0,
            10.0, 0.0, 2.0 * third, third,
            10.0, 20.0, 0.0, 100.0,
        ];
        assert_close(&features, &expected);
    }

    #[test]
    fn pauses_are_dropped_before_resampling() {
        // the pen rests at (10, 0) for a while; the resting sample's velocity is discarded
        let with_pause = stroke(&[
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 0.1),
            (10.0, 0.0, 0.6),
            (10.0, 10.0, 0.7),
        ]);
        let without_pause = stroke(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.1), (10.0, 10.0, 0.7)]);
        let encoder = PositionVelocityEncoder::new(5, BoundingBox::default());
        let a = encoder.encode(&with_pause).unwrap();
        let b = encoder.encode(&without_pause).unwrap();
        assert_eq!(a.len(), 20);
        // velocity at the corner is kept from the first arrival at (10, 0)
        assert!((a[4 * 2 + 2] - 100.0).abs() < 1e-6);
        // positions only depend on the path, but the centroid moves with the extra sample
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn stationary_stroke_cannot_be_interpolated() {
        let err = PositionVelocityEncoder::default()
            .encode(&stroke(&[
                (1.0, 1.0, 0.0),
                (1.0, 1.0, 0.1),
                (1.0, 1.0, 0.2),
            ]))
            .unwrap_err();
        assert_eq!(err, GestureError::InsufficientUniqueSamples { found: 1 });
        assert!(err.is_invalid_gesture());
    }

    #[test]
    fn single_point_is_too_short() {
        let err = PositionVelocityEncoder::default()
            .encode(&stroke(&[(1.0, 1.0, 0.0)]))
            .unwrap_err();
        assert_eq!(
            err,
            GestureError::TooFewPoints {
                found: 1,
                required: 2
            }
        );
    }
}
