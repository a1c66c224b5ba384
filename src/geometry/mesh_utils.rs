// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh integrity checks: degenerate triangles and non-manifold edges

use super::{Mesh, Triangle};
use crate::error::Result;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A topology problem found in a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Two or more corners of the face coincide exactly
    DegenerateTriangle { face_index: usize },
    /// An undirected edge used by more than two faces
    NonManifoldEdge {
        vertex_a: usize,
        vertex_b: usize,
        shared_by_faces: usize,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateTriangle { face_index } => {
                write!(f, "Degenerate triangle at face {}", face_index)
            }
            Self::NonManifoldEdge {
                vertex_a,
                vertex_b,
                shared_by_faces,
            } => write!(
                f,
                "Non-manifold edge detected: {}-{} (shared by {} faces)",
                vertex_a, vertex_b, shared_by_faces
            ),
        }
    }
}

/// Undirected edge between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: usize,
    v1: usize,
}

impl Edge {
    fn new(v0: usize, v1: usize) -> Self {
        // Always store edges with smaller index first for consistent hashing
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }

    fn of(triangle: &Triangle) -> [Edge; 3] {
        let [a, b, c] = triangle.indices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }
}

/// Per-edge face counts in first-encounter order
fn edge_counts(mesh: &Mesh) -> Vec<(Edge, usize)> {
    let mut slots: AHashMap<Edge, usize> = AHashMap::new();
    let mut counts: Vec<(Edge, usize)> = Vec::new();

    for triangle in mesh.triangles() {
        for edge in Edge::of(&triangle) {
            let slot = *slots.entry(edge).or_insert_with(|| {
                counts.push((edge, 0));
                counts.len() - 1
            });
            counts[slot].1 += 1;
        }
    }

    counts
}

fn is_degenerate(mesh: &Mesh, triangle: &Triangle) -> bool {
    let [p0, p1, p2] = mesh.corners(triangle);
    p0 == p1 || p1 == p2 || p0 == p2
}

/// Scan a mesh for degenerate triangles and non-manifold edges.
///
/// Degenerate warnings come first in face order, then non-manifold edges in the
/// order their first face was visited. Non-indexed meshes identify vertices by
/// position in the buffer, so duplicated shared corners are not welded.
///
/// Fails only when the mesh breaks its buffer invariants.
pub fn check_mesh(mesh: &Mesh) -> Result<Vec<ValidationWarning>> {
    mesh.check_structure()?;

    let mut warnings: Vec<ValidationWarning> = mesh
        .triangles()
        .enumerate()
        .filter(|(_, triangle)| is_degenerate(mesh, triangle))
        .map(|(face_index, _)| ValidationWarning::DegenerateTriangle { face_index })
        .collect();

    warnings.extend(
        edge_counts(mesh)
            .into_iter()
            .filter(|&(_, count)| count > 2)
            .map(|(edge, count)| ValidationWarning::NonManifoldEdge {
                vertex_a: edge.v0,
                vertex_b: edge.v1,
                shared_by_faces: count,
            }),
    );

    Ok(warnings)
}

/// Check if mesh is closed (each edge shared by exactly 2 triangles)
pub fn is_closed(mesh: &Mesh) -> Result<bool> {
    mesh.check_structure()?;
    Ok(edge_counts(mesh).iter().all(|&(_, count)| count == 2))
}

/// Count boundary edges (edges used by exactly one triangle)
pub fn boundary_edge_count(mesh: &Mesh) -> Result<usize> {
    mesh.check_structure()?;
    Ok(edge_counts(mesh)
        .iter()
        .filter(|&&(_, count)| count == 1)
        .count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use nalgebra::Point3;

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(5, 2), Edge::new(2, 5));
    }

    #[test]
    fn test_repeated_index_is_degenerate() {
        let mesh = Mesh::indexed(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![0, 0, 1],
        )
        .unwrap();
        let warnings = check_mesh(&mesh).unwrap();
        assert_eq!(
            warnings,
            vec![ValidationWarning::DegenerateTriangle { face_index: 0 }]
        );
    }

    #[test]
    fn test_signed_zero_counts_as_coincident() {
        let mesh = Mesh::soup(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(check_mesh(&mesh).unwrap().len(), 1);
    }

    #[test]
    fn test_edges_reported_in_encounter_order() {
        // Two fans of three faces each: edge 0-1 is seen before edge 2-3.
        let positions = (0..7)
            .map(|i| Point3::new(i as f64, (i * i) as f64, 0.0))
            .collect();
        let mesh = Mesh::indexed(
            positions,
            vec![0, 1, 4, 2, 3, 5, 1, 0, 5, 3, 2, 6, 0, 1, 6, 2, 3, 4],
        )
        .unwrap();
        let warnings = check_mesh(&mesh).unwrap();
        assert_eq!(
            warnings,
            vec![
                ValidationWarning::NonManifoldEdge {
                    vertex_a: 0,
                    vertex_b: 1,
                    shared_by_faces: 3
                },
                ValidationWarning::NonManifoldEdge {
                    vertex_a: 2,
                    vertex_b: 3,
                    shared_by_faces: 3
                },
            ]
        );
    }

    #[test]
    fn test_malformed_mesh_fails_fast() {
        let mesh = Mesh {
            positions: vec![Point3::origin(); 3],
            indices: Some(vec![0, 1, 7]),
        };
        assert!(matches!(
            check_mesh(&mesh),
            Err(GeometryError::MalformedMesh(_))
        ));
    }

    #[test]
    fn test_warning_messages() {
        let warning = ValidationWarning::NonManifoldEdge {
            vertex_a: 1,
            vertex_b: 4,
            shared_by_faces: 3,
        };
        assert_eq!(
            warning.to_string(),
            "Non-manifold edge detected: 1-4 (shared by 3 faces)"
        );
    }

    #[test]
    fn test_single_triangle_is_open() {
        let mesh = Mesh::soup(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        assert!(!is_closed(&mesh).unwrap());
        assert_eq!(boundary_edge_count(&mesh).unwrap(), 3);
    }
}
