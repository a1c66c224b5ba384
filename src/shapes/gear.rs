// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Spur gear: toothed outline extruded into a prism

use super::extrude::extrude_star;
use crate::error::{GeometryError, Result};
use crate::geometry::Mesh;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Gear parameters
///
/// An `inner_radius` larger than `outer_radius` flips the teeth inward and yields a
/// self-intersecting profile; it is accepted as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearParams {
    pub teeth: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Extrusion depth along +Z
    pub height: f64,
}

impl Default for GearParams {
    fn default() -> Self {
        Self {
            teeth: 10,
            outer_radius: 1.0,
            inner_radius: 0.7,
            height: 0.2,
        }
    }
}

impl GearParams {
    pub fn validate(&self) -> Result<()> {
        if self.teeth < 3 {
            return Err(GeometryError::invalid(
                "teeth",
                self.teeth as f64,
                "a gear needs at least 3 teeth",
            ));
        }
        if !(self.outer_radius > 0.0) {
            return Err(GeometryError::invalid(
                "outer_radius",
                self.outer_radius,
                "must be positive",
            ));
        }
        if !(self.height > 0.0) {
            return Err(GeometryError::invalid(
                "height",
                self.height,
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Closed gear outline in the XY plane; the last point equals the first.
///
/// Each of the `teeth` steps visits a tip on `outer_radius`, a root half a step later
/// pulled in by half the tooth depth, and the next tip. Tips shared by adjacent steps
/// are emitted once.
pub fn gear_outline(params: &GearParams) -> Vec<Point2<f64>> {
    let teeth = params.teeth as usize;
    let tooth_depth = (params.outer_radius - params.inner_radius) * 0.5;
    let root_radius = params.outer_radius - tooth_depth;
    let angle_step = 2.0 * PI / params.teeth as f64;
    let polar = |radius: f64, angle: f64| Point2::new(angle.cos() * radius, angle.sin() * radius);

    let mut outline = Vec::with_capacity(2 * teeth + 1);
    for i in 0..teeth {
        let tip = polar(params.outer_radius, i as f64 * angle_step);
        let root = polar(root_radius, (i as f64 + 0.5) * angle_step);
        let next_tip = polar(params.outer_radius, (i + 1) as f64 * angle_step);

        for point in [tip, root, next_tip] {
            if outline.last() != Some(&point) {
                outline.push(point);
            }
        }
    }

    // The final tip lands on the first one up to rounding; snap it shut.
    if let Some(&first) = outline.first() {
        if let Some(last) = outline.last_mut() {
            *last = first;
        }
    }
    outline
}

/// Generate a gear prism from `z = 0` to `z = height`
pub fn gear(params: &GearParams) -> Result<Mesh> {
    params.validate()?;
    Ok(extrude_star(&gear_outline(params), Point2::origin(), params.height))
}
