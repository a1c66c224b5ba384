// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bracket: rounded rectangular frame with a rounded hole, extruded along +Z

use super::extrude::extrude_frame;
use crate::error::{GeometryError, Result};
use crate::geometry::Mesh;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Divisions of each quarter-circle fillet
pub const FILLET_SEGMENTS: usize = 12;

/// Bracket parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketParams {
    pub width: f64,
    pub height: f64,
    /// Extrusion depth along +Z
    pub depth: f64,
    /// Wall thickness; the hole is `width - 2t` by `height - 2t`
    pub thickness: f64,
    /// Corner radius shared by the outer boundary and the hole; zero gives sharp corners
    pub fillet_radius: f64,
}

impl Default for BracketParams {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 1.5,
            depth: 0.5,
            thickness: 0.2,
            fillet_radius: 0.1,
        }
    }
}

impl BracketParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("thickness", self.thickness),
        ] {
            if !(value > 0.0) {
                return Err(GeometryError::invalid(name, value, "must be positive"));
            }
        }
        Ok(())
    }
}

/// Counter-clockwise rounded rectangle centered on the origin, as an open loop.
///
/// Starts at the bottom-right fillet and sweeps each corner through exactly 90°;
/// the straight edges are the gaps between consecutive fillets.
pub fn rounded_rect(width: f64, height: f64, radius: f64) -> Vec<Point2<f64>> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let corners = [
        (Point2::new(hw - radius, -hh + radius), 1.5 * PI),
        (Point2::new(hw - radius, hh - radius), 0.0),
        (Point2::new(-hw + radius, hh - radius), FRAC_PI_2),
        (Point2::new(-hw + radius, -hh + radius), PI),
    ];

    if radius == 0.0 {
        return corners.iter().map(|&(center, _)| center).collect();
    }

    let mut points = Vec::with_capacity(4 * (FILLET_SEGMENTS + 1));
    for (center, start) in corners {
        for k in 0..=FILLET_SEGMENTS {
            let angle = start + k as f64 / FILLET_SEGMENTS as f64 * FRAC_PI_2;
            points.push(Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }
    }
    points
}

/// Generate the bracket frame from `z = 0` to `z = depth`
pub fn bracket(params: &BracketParams) -> Result<Mesh> {
    params.validate()?;

    let outer = rounded_rect(params.width, params.height, params.fillet_radius);
    let hole = rounded_rect(
        params.width - params.thickness * 2.0,
        params.height - params.thickness * 2.0,
        params.fillet_radius,
    );
    Ok(extrude_frame(&outer, &hole, params.depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{check_mesh, is_closed};

    #[test]
    fn test_fillets_span_quarter_turns() {
        let points = rounded_rect(2.0, 1.0, 0.25);
        assert_eq!(points.len(), 4 * (FILLET_SEGMENTS + 1));
        // First fillet starts straight below its center and ends straight right of it.
        let start = points[0];
        let end = points[FILLET_SEGMENTS];
        assert!((start.x - 0.75).abs() < 1e-12 && (start.y + 0.5).abs() < 1e-12);
        assert!((end.x - 1.0).abs() < 1e-12 && (end.y + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_outline_is_counter_clockwise() {
        let points = rounded_rect(2.0, 1.5, 0.1);
        let n = points.len();
        let twice_area: f64 = (0..n)
            .map(|i| {
                let (p, q) = (points[i], points[(i + 1) % n]);
                p.x * q.y - q.x * p.y
            })
            .sum();
        assert!(twice_area > 0.0);
    }

    #[test]
    fn test_sharp_corners() {
        let points = rounded_rect(2.0, 1.0, 0.0);
        assert_eq!(points.len(), 4);
        let mesh = bracket(&BracketParams {
            fillet_radius: 0.0,
            ..Default::default()
        })
        .unwrap();
        assert!(check_mesh(&mesh).unwrap().is_empty());
    }

    #[test]
    fn test_bracket_is_watertight() {
        let mesh = bracket(&BracketParams::default()).unwrap();
        let loop_len = 4 * (FILLET_SEGMENTS + 1);
        assert_eq!(mesh.triangle_count(), 8 * loop_len);
        assert!(is_closed(&mesh).unwrap());
        assert!(check_mesh(&mesh).unwrap().is_empty());
    }

    #[test]
    fn test_slot_shaped_hole() {
        // Hole is 0.5 wide with 0.25 fillets, so its top and bottom edges have no length.
        let params = BracketParams {
            width: 1.0,
            thickness: 0.25,
            fillet_radius: 0.25,
            ..Default::default()
        };
        let loop_len = 4 * (FILLET_SEGMENTS + 1);
        let mesh = bracket(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 2 * loop_len + 2 * (loop_len - 2));
        assert_eq!(mesh.triangle_count(), 8 * loop_len - 8);
        assert!(is_closed(&mesh).unwrap());
        assert!(check_mesh(&mesh).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_zero_thickness() {
        let params = BracketParams {
            thickness: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bracket(&params),
            Err(GeometryError::InvalidParameter {
                name: "thickness",
                ..
            })
        ));
    }
}
