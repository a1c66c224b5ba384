// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Spiral: rippled helix swept with a round tube

use super::curve::{sweep_tube, CatmullRom};
use crate::error::{GeometryError, Result};
use crate::geometry::Mesh;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Cross-section samples around the tube
pub const TUBE_RADIAL_SEGMENTS: usize = 8;

/// Spiral parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    pub turns: u32,
    /// Mean distance of the centerline from the Y axis
    pub radius: f64,
    /// Rise along Y; the spiral is centered on `y = 0`
    pub height: f64,
    /// Tube radius; the centerline ripple amplitude is half of it
    pub thickness: f64,
    /// Centerline samples per turn
    pub segments: u32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            turns: 2,
            radius: 1.0,
            height: 1.0,
            thickness: 0.1,
            segments: 32,
        }
    }
}

impl SpiralParams {
    /// Number of centerline steps (`turns * segments`)
    pub fn steps(&self) -> usize {
        self.turns as usize * self.segments as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.turns == 0 {
            return Err(GeometryError::invalid(
                "turns",
                0.0,
                "a spiral needs at least one turn",
            ));
        }
        if self.segments == 0 {
            return Err(GeometryError::invalid(
                "segments",
                0.0,
                "segment count must be positive",
            ));
        }
        if !(self.thickness > 0.0) {
            return Err(GeometryError::invalid(
                "thickness",
                self.thickness,
                "tube thickness must be positive",
            ));
        }
        Ok(())
    }
}

/// Centerline samples, `steps + 1` of them.
///
/// Sample `i` sits at angle `i / segments * 2π` with radius
/// `radius + sin(angle * turns) * thickness / 2`.
pub fn spiral_centerline(params: &SpiralParams) -> Vec<Point3<f64>> {
    let steps = params.steps();
    (0..=steps)
        .map(|i| {
            let angle = i as f64 / params.segments as f64 * 2.0 * PI;
            let r = params.radius + (angle * params.turns as f64).sin() * params.thickness * 0.5;
            let y = i as f64 / steps as f64 * params.height;
            Point3::new(angle.cos() * r, y - params.height * 0.5, angle.sin() * r)
        })
        .collect()
}

/// Generate the spiral tube (open ends)
pub fn spiral(params: &SpiralParams) -> Result<Mesh> {
    params.validate()?;
    let path = CatmullRom::new(spiral_centerline(params));
    Ok(sweep_tube(
        &path,
        params.steps(),
        params.thickness,
        TUBE_RADIAL_SEGMENTS,
    ))
}
