// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh validator tests

use anyhow::Result;
use nalgebra::Point3;
use paramesh::geometry::{boundary_edge_count, check_mesh, is_closed, Mesh, ValidationWarning};
use paramesh::GeometryError;

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

#[test]
fn test_repeated_corner_is_one_degenerate() -> Result<()> {
    let a = p(1.0, 1.0, 0.0);
    let mesh = Mesh::soup(vec![a, a, p(2.0, 0.0, 0.0)])?;
    let warnings = check_mesh(&mesh)?;

    assert_eq!(
        warnings,
        vec![ValidationWarning::DegenerateTriangle { face_index: 0 }]
    );
    assert_eq!(warnings[0].to_string(), "Degenerate triangle at face 0");
    Ok(())
}

#[test]
fn test_three_faces_on_one_edge() -> Result<()> {
    let positions = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, -1.0, 0.0),
        p(0.0, 0.0, 1.0),
    ];
    let mesh = Mesh::indexed(positions, vec![0, 1, 2, 0, 1, 3, 1, 0, 4])?;
    let warnings = check_mesh(&mesh)?;

    assert_eq!(
        warnings,
        vec![ValidationWarning::NonManifoldEdge {
            vertex_a: 0,
            vertex_b: 1,
            shared_by_faces: 3,
        }]
    );
    assert_eq!(
        warnings[0].to_string(),
        "Non-manifold edge detected: 0-1 (shared by 3 faces)"
    );
    Ok(())
}

#[test]
fn test_degenerates_are_listed_before_edges() -> Result<()> {
    let positions = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, -1.0, 0.0),
        p(0.0, 0.0, 1.0),
        p(0.0, 0.0, 0.0),
    ];
    // Vertices 0 and 5 are distinct indices at the same position.
    let mesh = Mesh::indexed(positions, vec![0, 1, 2, 0, 1, 3, 0, 1, 4, 5, 0, 4])?;
    let warnings = check_mesh(&mesh)?;

    assert_eq!(warnings.len(), 2);
    assert_eq!(
        warnings[0],
        ValidationWarning::DegenerateTriangle { face_index: 3 }
    );
    assert!(matches!(
        warnings[1],
        ValidationWarning::NonManifoldEdge {
            vertex_a: 0,
            vertex_b: 1,
            shared_by_faces: 3,
        }
    ));
    Ok(())
}

#[test]
fn test_soup_does_not_weld_shared_corners() -> Result<()> {
    // The same edge appears in three faces, but each face has its own vertices.
    let mut positions = Vec::new();
    for apex in [p(0.0, 1.0, 0.0), p(0.0, -1.0, 0.0), p(0.0, 0.0, 1.0)] {
        positions.extend([p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), apex]);
    }
    let mesh = Mesh::soup(positions)?;

    assert!(check_mesh(&mesh)?.is_empty());
    assert_eq!(boundary_edge_count(&mesh)?, 9);
    Ok(())
}

#[test]
fn test_closed_tetrahedron() -> Result<()> {
    let positions = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 0.0, 1.0),
    ];
    let mesh = Mesh::indexed(positions, vec![0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3])?;

    assert!(check_mesh(&mesh)?.is_empty());
    assert!(is_closed(&mesh)?);
    assert_eq!(boundary_edge_count(&mesh)?, 0);
    Ok(())
}

#[test]
fn test_empty_mesh_is_clean() -> Result<()> {
    assert!(check_mesh(&Mesh::new())?.is_empty());
    Ok(())
}

#[test]
fn test_out_of_range_index_is_malformed() {
    let mesh = Mesh {
        positions: vec![p(0.0, 0.0, 0.0); 3],
        indices: Some(vec![0, 1, 7]),
    };
    assert!(matches!(
        check_mesh(&mesh),
        Err(GeometryError::MalformedMesh(_))
    ));
}

#[test]
fn test_warnings_serialize_with_kind_tag() -> Result<()> {
    let warning = ValidationWarning::NonManifoldEdge {
        vertex_a: 2,
        vertex_b: 5,
        shared_by_faces: 3,
    };
    let value = serde_json::to_value(warning)?;
    assert_eq!(value["kind"], "non_manifold_edge");
    assert_eq!(value["shared_by_faces"], 3);
    Ok(())
}
