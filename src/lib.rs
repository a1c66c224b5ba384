// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Paramesh parametric geometry kernel
//!
//! Generates triangle meshes for a small family of parametric shapes (gear, vase,
//! spiral, bracket), checks them for degenerate faces and non-manifold edges, and
//! serializes them as ASCII STL.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod shapes;
pub mod utils;

pub use config::{JobConfig, TransformConfig};
pub use error::{GeometryError, Result};
pub use geometry::{analyze, check_mesh, Mesh, MeshStats, ValidationWarning};
pub use io::{export_stl, export_stl_string};
pub use shapes::{generate_batch, ShapeParameters};

/// Build a preset shape and serialize it as ASCII STL in one call
pub fn render_preset(name: &str) -> Result<String> {
    let shape = ShapeParameters::preset(name)?;
    let mesh = shape.to_mesh()?;
    export_stl_string(&mesh, None, shape.kind())
}
