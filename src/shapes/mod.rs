// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parametric shape generators
//!
//! Every generator is a pure function of its parameters: the same input always
//! yields a bit-identical [`Mesh`], and generators can run on any number of threads
//! at once without coordination.

mod bracket;
mod curve;
mod extrude;
mod gear;
mod spiral;
mod vase;

pub use bracket::{bracket, rounded_rect, BracketParams, FILLET_SEGMENTS};
pub use curve::{rotation_minimizing_frames, sweep_tube, CatmullRom, Frame};
pub use gear::{gear, gear_outline, GearParams};
pub use spiral::{spiral, spiral_centerline, SpiralParams, TUBE_RADIAL_SEGMENTS};
pub use vase::{vase, VaseParams, DEFAULT_PROFILE};

use crate::error::{GeometryError, Result};
use crate::geometry::Mesh;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Shape parameters, one variant per generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeParameters {
    Gear(GearParams),
    Vase(VaseParams),
    Spiral(SpiralParams),
    Bracket(BracketParams),
}

const PRESET_NAMES: [&str; 4] = ["gear", "vase", "spiral", "bracket"];

impl ShapeParameters {
    pub fn gear(teeth: u32, outer_radius: f64, inner_radius: f64, height: f64) -> Self {
        Self::Gear(GearParams {
            teeth,
            outer_radius,
            inner_radius,
            height,
        })
    }

    pub fn vase(profile: Vec<[f64; 2]>, segments: u32) -> Self {
        Self::Vase(VaseParams { profile, segments })
    }

    pub fn spiral(turns: u32, radius: f64, height: f64, thickness: f64, segments: u32) -> Self {
        Self::Spiral(SpiralParams {
            turns,
            radius,
            height,
            thickness,
            segments,
        })
    }

    pub fn bracket(width: f64, height: f64, depth: f64, thickness: f64, fillet_radius: f64) -> Self {
        Self::Bracket(BracketParams {
            width,
            height,
            depth,
            thickness,
            fillet_radius,
        })
    }

    /// Built-in example shapes by name
    pub fn preset(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "gear" => Ok(Self::gear(20, 2.0, 1.5, 0.5)),
            "vase" => Ok(Self::vase(
                vec![
                    [0.0, 0.0],
                    [0.3, 0.2],
                    [0.7, 0.5],
                    [1.0, 1.5],
                    [0.8, 2.0],
                    [0.5, 2.3],
                    [0.3, 2.5],
                ],
                64,
            )),
            "spiral" => Ok(Self::spiral(3, 1.5, 2.0, 0.2, 64)),
            "bracket" => Ok(Self::bracket(2.0, 1.5, 0.5, 0.2, 0.1)),
            _ => Err(GeometryError::UnknownPreset(name.to_string())),
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &PRESET_NAMES
    }

    /// Generator name
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gear(_) => "gear",
            Self::Vase(_) => "vase",
            Self::Spiral(_) => "spiral",
            Self::Bracket(_) => "bracket",
        }
    }

    pub fn to_mesh(&self) -> Result<Mesh> {
        match self {
            Self::Gear(params) => gear(params),
            Self::Vase(params) => vase(params),
            Self::Spiral(params) => spiral(params),
            Self::Bracket(params) => bracket(params),
        }
    }
}

/// Generate several shapes in parallel; results keep the input order
pub fn generate_batch(shapes: &[ShapeParameters]) -> Vec<Result<Mesh>> {
    shapes.par_iter().map(ShapeParameters::to_mesh).collect()
}
