// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::{BoundingBox, Mesh};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Mesh statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Whether the mesh carries an index buffer
    pub indexed: bool,
    pub bbox: BoundingBox,
    /// Extent along x, y, z
    pub size: [f64; 3],
    /// Total surface area in square units
    pub surface_area: f64,
    /// SHA-256 over position bits and indices, in buffer order
    pub fingerprint: String,
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> Result<MeshStats> {
    mesh.check_structure()?;

    let bbox = mesh.bounding_box();
    let size = bbox.size();

    Ok(MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        indexed: mesh.is_indexed(),
        bbox,
        size: [size.x, size.y, size.z],
        surface_area: calculate_surface_area(mesh),
        fingerprint: calc_mesh_fingerprint(mesh),
    })
}

/// Calculate total surface area
fn calculate_surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles()
        .map(|triangle| {
            let [v0, v1, v2] = mesh.corners(&triangle);
            (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
        })
        .sum()
}

/// Hash positions and indices exactly as stored; equal digests mean bit-identical meshes
fn calc_mesh_fingerprint(mesh: &Mesh) -> String {
    let mut hasher = Sha256::new();

    hasher.update((mesh.positions.len() as u64).to_le_bytes());
    for position in &mesh.positions {
        hasher.update(position.x.to_bits().to_le_bytes());
        hasher.update(position.y.to_bits().to_le_bytes());
        hasher.update(position.z.to_bits().to_le_bytes());
    }

    match &mesh.indices {
        Some(indices) => {
            hasher.update([1u8]);
            for index in indices {
                hasher.update(index.to_le_bytes());
            }
        }
        None => hasher.update([0u8]),
    }

    format!("{:x}", hasher.finalize())
}
