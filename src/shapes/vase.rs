// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vase: profile revolved around the Y axis

use crate::error::{GeometryError, Result};
use crate::geometry::Mesh;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Profile used when none is given, as `[radius, height]` pairs
pub const DEFAULT_PROFILE: [[f64; 2]; 7] = [
    [0.0, 0.0],
    [0.3, 0.2],
    [0.5, 0.5],
    [0.7, 1.0],
    [0.6, 1.5],
    [0.4, 1.8],
    [0.3, 2.0],
];

/// Vase parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaseParams {
    /// Generatrix as `[radius, height]` pairs; empty selects [`DEFAULT_PROFILE`].
    /// Negative radii fold the surface through the axis.
    pub profile: Vec<[f64; 2]>,
    pub segments: u32,
}

impl Default for VaseParams {
    fn default() -> Self {
        Self {
            profile: Vec::new(),
            segments: 32,
        }
    }
}

impl VaseParams {
    /// The profile that will actually be revolved
    pub fn effective_profile(&self) -> Vec<[f64; 2]> {
        if self.profile.is_empty() {
            DEFAULT_PROFILE.to_vec()
        } else {
            self.profile.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments < 3 {
            return Err(GeometryError::invalid(
                "segments",
                self.segments as f64,
                "a lathe needs at least 3 segments",
            ));
        }
        if self.profile.len() == 1 {
            return Err(GeometryError::invalid(
                "profile",
                1.0,
                "a profile needs at least 2 points",
            ));
        }
        Ok(())
    }
}

/// Revolve the profile a full turn.
///
/// Columns run from angle 0 to 2π inclusive, so the seam column is duplicated.
/// Produces `2 * segments * (profile_len - 1)` triangles.
pub fn vase(params: &VaseParams) -> Result<Mesh> {
    params.validate()?;

    let profile = params.effective_profile();
    let segments = params.segments as usize;
    let rows = profile.len();
    let mut mesh = Mesh::with_capacity((segments + 1) * rows, 2 * segments * (rows - 1));

    for i in 0..=segments {
        let phi = i as f64 / segments as f64 * 2.0 * PI;
        let (sin, cos) = phi.sin_cos();
        for &[radius, height] in &profile {
            mesh.add_vertex(Point3::new(radius * sin, height, radius * cos));
        }
    }

    let rows = rows as u32;
    for i in 0..segments as u32 {
        for j in 0..rows - 1 {
            let base = j + i * rows;
            let a = base;
            let b = base + rows;
            let c = base + rows + 1;
            let d = base + 1;
            mesh.add_triangle(a, b, d);
            mesh.add_triangle(c, d, b);
        }
    }

    Ok(mesh)
}
