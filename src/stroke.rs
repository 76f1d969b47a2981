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
    error::GestureError,
    point::{Point, RawPoint},
};
use tracing::debug;

/// Lower bound for the time delta between two samples when computing velocities
pub const VELOCITY_EPSILON: f64 = 1e-6;
/// Strokes shorter than this are rejected before encoding
pub const MIN_CLASSIFIABLE_POINTS: usize = 3;

/// Position of a sample together with its instantaneous velocity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// One complete gesture, from pointer-down to pointer-up.
/// Always holds at least one point.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<RawPoint>,
}

impl Stroke {
    pub fn new(points: Vec<RawPoint>) -> Result<Self, GestureError> {
        if points.is_empty() {
            return Err(GestureError::TooFewPoints {
                found: 0,
                required: 1,
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[RawPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time between the first and the last sample, in seconds
    pub fn duration(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.t - first.t,
            _ => 0.0,
        }
    }

    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(RawPoint::position).collect()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Finite-difference velocities from consecutive raw samples.
    /// The first sample has no predecessor and gets a zero velocity.
    pub fn velocities(&self) -> Vec<VelocitySample> {
        let mut samples = Vec::with_capacity(self.points.len());
        for (i, p) in self.points.iter().enumerate() {
            let (vx, vy) = if i == 0 {
                (0.0, 0.0)
            } else {
                let prev = &self.points[i - 1];
                let dt = (p.t - prev.t).max(VELOCITY_EPSILON);
                ((p.x - prev.x) / dt, (p.y - prev.y) / dt)
            };
            samples.push(VelocitySample {
                x: p.x,
                y: p.y,
                vx,
                vy,
            });
        }
        samples
    }

    /// Rejects strokes too short to be worth sending to a classifier
    pub fn ensure_classifiable(&self) -> Result<(), GestureError> {
        if self.points.len() < MIN_CLASSIFIABLE_POINTS {
            return Err(GestureError::TooFewPoints {
                found: self.points.len(),
                required: MIN_CLASSIFIABLE_POINTS,
            });
        }
        Ok(())
    }
}

/// Collects pointer events into strokes.
///
/// Only one stroke is recorded at a time: pressing the pointer again
/// while a stroke is in progress discards the unfinished one.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    current: Option<Vec<RawPoint>>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down
    pub fn begin(&mut self, point: RawPoint) {
        if let Some(discarded) = self.current.take() {
            debug!(points = discarded.len(), "discarding unfinished stroke");
        }
        self.current = Some(vec![point]);
    }

    /// Pointer move. Returns false when no stroke is in progress.
    pub fn extend(&mut self, mut point: RawPoint) -> bool {
        let Some(points) = self.current.as_mut() else {
            return false;
        };
        if let Some(last) = points.last() {
            // clocks can step backwards between events
            if point.t < last.t {
                point.t = last.t;
            }
        }
        points.push(point);
        true
    }

    pub fn is_recording(&self) -> bool {
        self.current.is_some()
    }

    /// Number of samples in the stroke being recorded
    pub fn len(&self) -> usize {
        self.current.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pointer up: seals the stroke in progress
    pub fn finish(&mut self) -> Option<Stroke> {
        let points = self.current.take()?;
        Stroke::new(points).ok()
    }

    /// Pointer left the drawing surface
    pub fn cancel(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f64, f64, f64)]) -> Stroke {
        Stroke::new(
            points
                .iter()
                .map(|&(x, y, t)| RawPoint::new(x, y, t))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_stroke_is_rejected() {
        assert_eq!(
            Stroke::new(vec![]),
            Err(GestureError::TooFewPoints {
                found: 0,
                required: 1
            })
        );
    }

    #[test]
    fn duration_spans_first_to_last_sample() {
        let s = stroke(&[(0.0, 0.0, 10.0), (1.0, 1.0, 10.25), (2.0, 2.0, 10.5)]);
        assert!((s.duration() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn velocities_use_consecutive_samples() {
        let s = stroke(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.5), (10.0, 5.0, 1.0)]);
        let v = s.velocities();
        assert_eq!(v.len(), 3);
        assert_eq!((v[0].vx, v[0].vy), (0.0, 0.0));
        assert!((v[1].vx - 20.0).abs() < 1e-9);
        assert!(v[1].vy.abs() < 1e-9);
        assert!(v[2].vx.abs() < 1e-9);
        assert!((v[2].vy - 10.0).abs() < 1e-9);
    }

    #[test]
    fn simultaneous_samples_do_not_divide_by_zero() {
        let s = stroke(&[(0.0, 0.0, 1.0), (1.0, 0.0, 1.0)]);
        let v = s.velocities();
        assert!(v[1].vx.is_finite());
        assert!((v[1].vx - 1.0 / VELOCITY_EPSILON).abs() < 1e-3);
    }

    #[test]
    fn short_strokes_are_not_classifiable() {
        let s = stroke(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.1)]);
        assert_eq!(
            s.ensure_classifiable(),
            Err(GestureError::TooFewPoints {
                found: 2,
                required: MIN_CLASSIFIABLE_POINTS
            })
        );
        let s = stroke(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.1), (2.0, 2.0, 0.2)]);
        assert!(s.ensure_classifiable().is_ok());
    }

    #[test]
    fn recorder_follows_pointer_lifecycle() {
        let mut recorder = StrokeRecorder::new();
        assert!(!recorder.extend(RawPoint::new(1.0, 1.0, 0.0)));
        assert!(recorder.finish().is_none());

        recorder.begin(RawPoint::new(0.0, 0.0, 0.0));
        assert!(recorder.extend(RawPoint::new(1.0, 0.0, 0.1)));
        assert!(recorder.extend(RawPoint::new(2.0, 0.0, 0.2)));
        assert_eq!(recorder.len(), 3);

        let stroke = recorder.finish().unwrap();
        assert_eq!(stroke.len(), 3);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn new_stroke_discards_the_unfinished_one() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin(RawPoint::new(0.0, 0.0, 0.0));
        recorder.extend(RawPoint::new(5.0, 5.0, 0.1));
        recorder.begin(RawPoint::new(9.0, 9.0, 1.0));
        let stroke = recorder.finish().unwrap();
        assert_eq!(stroke.points(), &[RawPoint::new(9.0, 9.0, 1.0)]);
    }

    #[test]
    fn recorder_keeps_time_non_decreasing() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin(RawPoint::new(0.0, 0.0, 2.0));
        recorder.extend(RawPoint::new(1.0, 0.0, 1.5));
        let stroke = recorder.finish().unwrap();
        assert_eq!(stroke.points()[1].t, 2.0);
    }

    #[test]
    fn cancel_drops_the_stroke() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin(RawPoint::new(0.0, 0.0, 0.0));
        recorder.cancel();
        assert!(recorder.is_empty());
        assert!(recorder.finish().is_none());
    }
}
