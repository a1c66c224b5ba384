// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities

use super::BoundingBox;
use crate::error::{GeometryError, Result};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// Vertex position
pub type Vertex = Point3<f64>;

/// Triangle defined by three vertex indices
///
/// For non-indexed meshes the indices are the positional ordinals `3i, 3i+1, 3i+2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Triangular mesh: a flat position buffer plus an optional index buffer.
///
/// Without an index buffer every consecutive triple of positions is one triangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<Vertex>,
    pub indices: Option<Vec<u32>>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Create an empty indexed mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Some(Vec::new()),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            indices: Some(Vec::with_capacity(triangle_count * 3)),
        }
    }

    /// Build an indexed mesh, checking the buffer invariants
    pub fn indexed(positions: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        let mesh = Self {
            positions,
            indices: Some(indices),
        };
        mesh.check_structure()?;
        Ok(mesh)
    }

    /// Build a non-indexed mesh (triangle soup), checking the buffer invariants
    pub fn soup(positions: Vec<Vertex>) -> Result<Self> {
        let mesh = Self {
            positions,
            indices: None,
        };
        mesh.check_structure()?;
        Ok(mesh)
    }

    /// Add a vertex and return its index
    ///
    /// A soup mesh is switched to an index buffer over its existing triangles first,
    /// so the new vertex never joins an implicit triangle.
    pub fn add_vertex(&mut self, position: Vertex) -> u32 {
        self.index_buffer();
        let index = self.positions.len() as u32;
        self.positions.push(position);
        index
    }

    /// Add a triangle by vertex indices
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.index_buffer().extend_from_slice(&[a, b, c]);
    }

    /// Index buffer, created from the positional ordinals of a soup mesh
    fn index_buffer(&mut self) -> &mut Vec<u32> {
        let soup_len = (self.positions.len() / 3 * 3) as u32;
        self.indices.get_or_insert_with(|| (0..soup_len).collect())
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Verify the index-bounds and triangle-multiple invariants
    pub fn check_structure(&self) -> Result<()> {
        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(GeometryError::MalformedMesh(format!(
                        "index buffer length {} is not a multiple of 3",
                        indices.len()
                    )));
                }
                let vertex_count = self.positions.len();
                if let Some(slot) = indices
                    .iter()
                    .position(|&index| index as usize >= vertex_count)
                {
                    return Err(GeometryError::MalformedMesh(format!(
                        "index {} at slot {} is out of bounds for {} vertices",
                        indices[slot], slot, vertex_count
                    )));
                }
            }
            None => {
                if self.positions.len() % 3 != 0 {
                    return Err(GeometryError::MalformedMesh(format!(
                        "vertex count {} of a non-indexed mesh is not a multiple of 3",
                        self.positions.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Iterate triangles in source order
    ///
    /// Callers must have run [`Mesh::check_structure`]; indices are not bounds-checked here.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(move |face| self.triangle(face))
    }

    /// Triangle at a 0-based face ordinal
    pub fn triangle(&self, face: usize) -> Triangle {
        let base = face * 3;
        match &self.indices {
            Some(indices) => Triangle::new([
                indices[base] as usize,
                indices[base + 1] as usize,
                indices[base + 2] as usize,
            ]),
            None => Triangle::new([base, base + 1, base + 2]),
        }
    }

    /// Resolve the three corner positions of a triangle
    pub fn corners(&self, triangle: &Triangle) -> [Vertex; 3] {
        let [a, b, c] = triangle.indices;
        [self.positions[a], self.positions[b], self.positions[c]]
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.positions)
    }

    /// Return a copy with every position mapped through `matrix`
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Mesh {
        Mesh {
            positions: self
                .positions
                .iter()
                .map(|p| matrix.transform_point(p))
                .collect(),
            indices: self.indices.clone(),
        }
    }
}
