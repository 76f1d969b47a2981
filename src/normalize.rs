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

use crate::{geometry, point::Point};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::trace;

/// Box a centered gesture is scaled to fit into
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(50.0, 40.0)
    }
}

/// Result of [`center_and_scale`]
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub points: Vec<Point>,
    /// Centroid of the input, subtracted from every point
    pub centroid: Point,
    /// Uniform factor applied to both axes after centering
    pub scale_factor: f64,
}

/// Centers the points on their centroid and applies one uniform scale so the
/// shape fits `target` without changing its aspect ratio.
///
/// Each axis proposes `extent / (2 * max |coordinate|)`, or 1.0 when the axis
/// is flat; the smaller proposal wins.
pub fn center_and_scale(points: &[Point], target: BoundingBox) -> Normalized {
    let c = geometry::centroid(points);
    let centered: Vec<Point> = points
        .iter()
        .map(|p| Point::new(p.x - c.x, p.y - c.y))
        .collect();

    let (mut max_x, mut max_y) = (0.0_f64, 0.0_f64);
    for p in &centered {
        max_x = max_x.max(p.x.abs());
        max_y = max_y.max(p.y.abs());
    }
    let scale_x = if max_x > 0.0 {
        target.width / (2.0 * max_x)
    } else {
        1.0
    };
    let scale_y = if max_y > 0.0 {
        target.height / (2.0 * max_y)
    } else {
        1.0
    };
    let scale_factor = scale_x.min(scale_y);

    Normalized {
        points: centered
            .into_iter()
            .map(|p| Point::new(p.x * scale_factor, p.y * scale_factor))
            .collect(),
        centroid: c,
        scale_factor,
    }
}

/// Maps one axis onto [0, 1]. A flat axis maps to all zeros.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let (mut min, mut max) = (f64::MAX, f64::MIN);
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;
    if values.is_empty() || range == 0.0 {
        trace!(len = values.len(), "degenerate axis, emitting zeros");
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}

/// [`min_max`] applied to each axis independently: no centering, no aspect lock
pub fn min_max_points(points: &[Point]) -> Vec<Point> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    min_max(&xs)
        .into_iter()
        .zip(min_max(&ys))
        .map(|(x, y)| Point::new(x, y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: &Point, x: f64, y: f64) -> bool {
        (a.x - x).abs() < EPS && (a.y - y).abs() < EPS
    }

    #[test]
    fn centered_scaled_keeps_aspect_ratio() {
        // 20 wide, 10 tall
        let points = [
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let n = center_and_scale(&points, BoundingBox::default());
        assert!(close(&n.centroid, 10.0, 5.0));
        // x proposes 50 / 20, y proposes 40 / 10
        assert!((n.scale_factor - 2.5).abs() < EPS);
        assert!(close(&n.points[0], -25.0, -12.5));
        assert!(close(&n.points[2], 25.0, 12.5));
    }

    #[test]
    fn flat_axis_falls_back_to_unit_scale() {
        let points = [Point::new(0.0, 3.0), Point::new(4.0, 3.0)];
        let n = center_and_scale(&points, BoundingBox::default());
        // x proposes 50 / 4, y is flat and proposes 1.0
        assert!((n.scale_factor - 1.0).abs() < EPS);
        assert!(close(&n.points[0], -2.0, 0.0));

        let single = center_and_scale(&[Point::new(7.0, 7.0)], BoundingBox::default());
        assert_eq!(single.scale_factor, 1.0);
        assert!(close(&single.points[0], 0.0, 0.0));
    }

    #[test]
    fn min_max_maps_onto_unit_interval() {
        assert_eq!(min_max(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn degenerate_axis_becomes_zeros() {
        assert_eq!(min_max(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
        assert!(min_max(&[]).is_empty());

        let points = min_max_points(&[Point::new(1.0, 9.0), Point::new(3.0, 9.0)]);
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
    }
}
