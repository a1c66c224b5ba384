// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interpolating path curve and tube sweep

use crate::geometry::Mesh;
use crate::utils::math::lerp;
use nalgebra::{Point3, Rotation3, Unit, Vector3};
use std::f64::consts::PI;

/// Samples used to tabulate arc length
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Centripetal Catmull-Rom spline through a sequence of points.
///
/// Open ends are extended by mirroring the neighbouring point, so the curve passes
/// through the first and last sample.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Point3<f64>>,
    /// Cumulative chord length at `ARC_LENGTH_DIVISIONS + 1` uniform parameters
    arc_lengths: Vec<f64>,
}

/// Cubic coefficients of one span, per axis
struct Span {
    c: [Vector3<f64>; 4],
}

impl Span {
    fn point(&self, w: f64) -> Point3<f64> {
        Point3::from(self.c[0] + self.c[1] * w + self.c[2] * (w * w) + self.c[3] * (w * w * w))
    }

    fn derivative(&self, w: f64) -> Vector3<f64> {
        self.c[1] + self.c[2] * (2.0 * w) + self.c[3] * (3.0 * w * w)
    }
}

impl CatmullRom {
    /// Build the spline; needs at least two points
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        debug_assert!(points.len() >= 2);
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.tabulate_lengths();
        curve
    }

    /// Total arc length (chord approximation)
    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Span index and local weight for a global parameter `t` in [0, 1]
    fn locate(&self, t: f64) -> (usize, f64) {
        let l = self.points.len();
        let p = (l - 1) as f64 * t;
        let mut index = p.floor() as usize;
        let mut weight = p - index as f64;
        if index >= l - 1 {
            index = l - 2;
            weight = 1.0;
        }
        (index, weight)
    }

    fn span(&self, index: usize) -> Span {
        let l = self.points.len();
        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            p1 + (p1 - p2)
        };
        let p3 = if index + 2 < l {
            self.points[index + 2]
        } else {
            p2 + (p2 - p1)
        };

        let mut dt0 = (p1 - p0).norm_squared().powf(0.25);
        let mut dt1 = (p2 - p1).norm_squared().powf(0.25);
        let mut dt2 = (p3 - p2).norm_squared().powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
        let x1 = p1.coords;
        let x2 = p2.coords;

        Span {
            c: [
                x1,
                t1,
                -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
                2.0 * x1 - 2.0 * x2 + t1 + t2,
            ],
        }
    }

    /// Point at global parameter `t` in [0, 1] (uniform in sample index)
    pub fn point(&self, t: f64) -> Point3<f64> {
        let (index, weight) = self.locate(t);
        self.span(index).point(weight)
    }

    /// Unit tangent at global parameter `t`
    pub fn tangent(&self, t: f64) -> Vector3<f64> {
        let (index, weight) = self.locate(t);
        self.span(index).derivative(weight).normalize()
    }

    fn tabulate_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for step in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point(step as f64 / ARC_LENGTH_DIVISIONS as f64);
            sum += (current - last).norm();
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    /// Map an arc-length fraction `u` in [0, 1] to the curve parameter `t`
    pub fn u_to_t(&self, u: f64) -> f64 {
        let last = self.arc_lengths.len() - 1;
        let target = u * self.length();

        // Last tabulated entry not past the target
        let i = self
            .arc_lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(last);

        if self.arc_lengths[i] == target || i == last {
            return i as f64 / last as f64;
        }

        let before = self.arc_lengths[i];
        let fraction = (target - before) / (self.arc_lengths[i + 1] - before);
        lerp(i as f64, (i + 1) as f64, fraction) / last as f64
    }

    pub fn point_at(&self, u: f64) -> Point3<f64> {
        self.point(self.u_to_t(u))
    }

    pub fn tangent_at(&self, u: f64) -> Vector3<f64> {
        self.tangent(self.u_to_t(u))
    }
}

/// Orthonormal frame carried along a path
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub position: Point3<f64>,
    pub tangent: Vector3<f64>,
    pub normal: Vector3<f64>,
    pub binormal: Vector3<f64>,
}

/// Rotation-minimizing frames at `segments + 1` arc-length stations.
///
/// The first normal is seeded from the world axis least aligned with the tangent;
/// each later frame rotates the previous normal by the turn between tangents.
pub fn rotation_minimizing_frames(curve: &CatmullRom, segments: usize) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::with_capacity(segments + 1);

    for i in 0..=segments {
        let u = i as f64 / segments as f64;
        let position = curve.point_at(u);
        let tangent = curve.tangent_at(u);

        let normal = match frames.last() {
            None => seed_normal(&tangent),
            Some(previous) => {
                let axis = previous.tangent.cross(&tangent);
                if axis.norm() > f64::EPSILON {
                    let theta = previous.tangent.dot(&tangent).clamp(-1.0, 1.0).acos();
                    Rotation3::from_axis_angle(&Unit::new_normalize(axis), theta) * previous.normal
                } else {
                    previous.normal
                }
            }
        };

        frames.push(Frame {
            position,
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        });
    }

    frames
}

fn seed_normal(tangent: &Vector3<f64>) -> Vector3<f64> {
    let (tx, ty, tz) = (tangent.x.abs(), tangent.y.abs(), tangent.z.abs());
    let mut min = f64::MAX;
    let mut axis = Vector3::x();
    if tx <= min {
        min = tx;
        axis = Vector3::x();
    }
    if ty <= min {
        min = ty;
        axis = Vector3::y();
    }
    if tz <= min {
        axis = Vector3::z();
    }
    let side = tangent.cross(&axis).normalize();
    tangent.cross(&side)
}

/// Sweep a circle of `radius` sampled `radial_segments` times along `curve`.
///
/// Produces `(tubular_segments + 1) * (radial_segments + 1)` vertices; the seam
/// column is duplicated and the ends are left open.
pub fn sweep_tube(
    curve: &CatmullRom,
    tubular_segments: usize,
    radius: f64,
    radial_segments: usize,
) -> Mesh {
    let frames = rotation_minimizing_frames(curve, tubular_segments);
    let ring = radial_segments + 1;
    let mut mesh = Mesh::with_capacity(
        (tubular_segments + 1) * ring,
        2 * tubular_segments * radial_segments,
    );

    for frame in &frames {
        for j in 0..=radial_segments {
            let v = j as f64 / radial_segments as f64 * 2.0 * PI;
            let sin = v.sin();
            let cos = -v.cos();
            let direction = (frame.normal * cos + frame.binormal * sin).normalize();
            mesh.add_vertex(frame.position + direction * radius);
        }
    }

    let ring = ring as u32;
    for j in 1..=tubular_segments as u32 {
        for i in 1..=radial_segments as u32 {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            mesh.add_triangle(a, b, d);
            mesh.add_triangle(b, c, d);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::approx_eq;

    fn arc() -> CatmullRom {
        let points = (0..=16)
            .map(|i| {
                let a = i as f64 / 16.0 * PI;
                Point3::new(a.cos(), 0.0, a.sin())
            })
            .collect();
        CatmullRom::new(points)
    }

    #[test]
    fn test_passes_through_samples() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
        ];
        let curve = CatmullRom::new(points.clone());
        for (i, p) in points.iter().enumerate() {
            let q = curve.point(i as f64 / 3.0);
            assert!((q - p).norm() < 1e-12, "sample {} off curve: {:?}", i, q);
        }
    }

    #[test]
    fn test_arc_length_of_half_circle() {
        let curve = arc();
        assert!(approx_eq(curve.length(), PI, 1e-3));
        assert_eq!(curve.u_to_t(0.0), 0.0);
        assert!(approx_eq(curve.u_to_t(1.0), 1.0, 1e-12));
        // Evenly spaced samples on a circle: arc length is linear in t.
        assert!(approx_eq(curve.u_to_t(0.5), 0.5, 1e-3));
    }

    #[test]
    fn test_frames_are_orthonormal() {
        let frames = rotation_minimizing_frames(&arc(), 24);
        assert_eq!(frames.len(), 25);
        for frame in &frames {
            assert!(approx_eq(frame.tangent.norm(), 1.0, 1e-9));
            assert!(approx_eq(frame.normal.norm(), 1.0, 1e-9));
            assert!(approx_eq(frame.binormal.norm(), 1.0, 1e-9));
            assert!(frame.tangent.dot(&frame.normal).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tube_counts_and_radius() {
        let curve = arc();
        let mesh = sweep_tube(&curve, 10, 0.25, 8);
        assert_eq!(mesh.vertex_count(), 11 * 9);
        assert_eq!(mesh.triangle_count(), 2 * 10 * 8);

        let frames = rotation_minimizing_frames(&curve, 10);
        for (i, frame) in frames.iter().enumerate() {
            for j in 0..9 {
                let p = mesh.positions[i * 9 + j];
                assert!(approx_eq((p - frame.position).norm(), 0.25, 1e-9));
            }
        }
    }
}
