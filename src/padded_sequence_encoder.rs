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
    normalize,
    stroke::Stroke,
};
use tracing::debug;

/// Default number of (x, y) pairs fed to the SVM
pub const MAX_SEQUENCE_LENGTH: usize = 100;

/// SVM input: raw samples min-max normalized per axis, zero-padded or
/// truncated to `max_sequence_length` pairs, flattened as `[x1, y1, ...]`.
///
/// Unlike the arc-length encoders this one never rejects a stroke: a
/// stationary stroke encodes to all zeros.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaddedSequenceEncoder {
    pub max_sequence_length: usize,
}

impl PaddedSequenceEncoder {
    pub fn new(max_sequence_length: usize) -> Self {
        Self { max_sequence_length }
    }
}

impl Default for PaddedSequenceEncoder {
    fn default() -> Self {
        Self::new(MAX_SEQUENCE_LENGTH)
    }
}

impl FeatureEncoder for PaddedSequenceEncoder {
    fn encode(&self, stroke: &Stroke) -> Result<FeatureVector, GestureError> {
        let xs = normalize::min_max(&stroke.xs());
        let ys = normalize::min_max(&stroke.ys());

        let mut features = Vec::with_capacity(self.output_len());
        for (x, y) in xs.into_iter().zip(ys).take(self.max_sequence_length) {
            features.push(x);
            features.push(y);
        }
        features.resize(self.output_len(), 0.0);

        if stroke.len() > self.max_sequence_length {
            debug!(
                points = stroke.len(),
                kept = self.max_sequence_length,
                "truncated sequence"
            );
        }
        debug!(
            points = stroke.len(),
            len = features.len(),
            "encoded padded sequence"
        );
        Ok(features.into())
    }

    fn output_len(&self) -> usize {
        2 * self.max_sequence_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::RawPoint;

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke::new(
            points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| RawPoint::new(x, y, i as f64 * 0.01))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn short_stroke_is_zero_padded() {
        let features = PaddedSequenceEncoder::new(5)
            .encode(&stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]))
            .unwrap();
        assert_eq!(
            features.as_slice(),
            &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn long_stroke_keeps_its_first_pairs() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 9.0 - i as f64)).collect();
        let features = PaddedSequenceEncoder::new(3).encode(&stroke(&points)).unwrap();
        // normalization sees every sample before truncation
        let ninth = 1.0 / 9.0;
        let expected = [0.0, 1.0, ninth, 1.0 - ninth, 2.0 * ninth, 1.0 - 2.0 * ninth];
        assert_eq!(features.len(), 6);
        for (a, e) in features.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12);
        }
    }

    #[test]
    fn stationary_stroke_encodes_to_zeros() {
        let features = PaddedSequenceEncoder::default()
            .encode(&stroke(&[(4.0, 4.0), (4.0, 4.0), (4.0, 4.0)]))
            .unwrap();
        assert_eq!(features.len(), 200);
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_point_is_accepted() {
        let features = PaddedSequenceEncoder::new(2).encode(&stroke(&[(4.0, 7.0)])).unwrap();
        assert_eq!(features.as_slice(), &[0.0; 4]);
    }
}
