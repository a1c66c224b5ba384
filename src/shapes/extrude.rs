// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Linear extrusion of closed 2D outlines along +Z

use crate::geometry::Mesh;
use nalgebra::{Point2, Point3};

/// Drop the closing duplicate of a closed outline
fn open_loop(outline: &[Point2<f64>]) -> &[Point2<f64>] {
    match (outline.first(), outline.last()) {
        (Some(first), Some(last)) if outline.len() > 1 && first == last => {
            &outline[..outline.len() - 1]
        }
        _ => outline,
    }
}

/// Push one copy of the loop at `z`, returning the vertex ids.
///
/// A point equal to its predecessor (or, at the end, to the first point) reuses that
/// vertex, so zero-length edges collapse onto a single vertex.
fn add_ring(mesh: &mut Mesh, outline: &[Point2<f64>], z: f64) -> Vec<u32> {
    let n = outline.len();
    let mut ids: Vec<u32> = Vec::with_capacity(n);
    for (i, p) in outline.iter().enumerate() {
        let id = if i > 0 && outline[i - 1] == *p {
            ids[i - 1]
        } else if i > 0 && i + 1 == n && outline[0] == *p {
            ids[0]
        } else {
            mesh.add_vertex(Point3::new(p.x, p.y, z))
        };
        ids.push(id);
    }
    ids
}

/// Add a face unless two of its corners share a vertex
fn add_face(mesh: &mut Mesh, a: u32, b: u32, c: u32) {
    if a != b && b != c && a != c {
        mesh.add_triangle(a, b, c);
    }
}

/// Side walls between a bottom and a top ring.
///
/// With `facing_right` the wall normals point to the right of the loop direction,
/// which is outward for a counter-clockwise boundary. Pass `false` for holes.
fn add_walls(mesh: &mut Mesh, bottom: &[u32], top: &[u32], facing_right: bool) {
    let n = bottom.len();
    for i in 0..n {
        let next = (i + 1) % n;
        let (b0, b1, t0, t1) = (bottom[i], bottom[next], top[i], top[next]);
        if facing_right {
            add_face(mesh, b0, b1, t1);
            add_face(mesh, b0, t1, t0);
        } else {
            add_face(mesh, b0, t1, b1);
            add_face(mesh, b0, t0, t1);
        }
    }
}

/// Extrude a counter-clockwise outline that is star-shaped around `center`.
///
/// Caps are triangle fans from a center vertex; the bottom cap sits at `z = 0` and
/// faces -Z, the top cap at `z = depth` faces +Z. A closing duplicate point is ignored.
pub(crate) fn extrude_star(outline: &[Point2<f64>], center: Point2<f64>, depth: f64) -> Mesh {
    let outline = open_loop(outline);
    let n = outline.len();
    let mut mesh = Mesh::with_capacity(2 * n + 2, 4 * n);

    let bottom_center = mesh.add_vertex(Point3::new(center.x, center.y, 0.0));
    let top_center = mesh.add_vertex(Point3::new(center.x, center.y, depth));
    let bottom = add_ring(&mut mesh, outline, 0.0);
    let top = add_ring(&mut mesh, outline, depth);

    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_triangle(bottom_center, bottom[next], bottom[i]);
    }
    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_triangle(top_center, top[i], top[next]);
    }
    add_walls(&mut mesh, &bottom, &top, true);

    mesh
}

/// Extrude the region between a counter-clockwise outer loop and a counter-clockwise
/// hole loop sampled point-for-point alongside it.
///
/// Both loops are open (no closing duplicate) and have the same length. Caps are
/// stitched as quads between corresponding outer and hole points. Zero-length edges
/// are welded and the faces they would collapse are left out. Hole walls are built
/// against the reversed traversal so they face into the hole.
pub(crate) fn extrude_frame(outer: &[Point2<f64>], hole: &[Point2<f64>], depth: f64) -> Mesh {
    let n = outer.len().min(hole.len());
    let mut mesh = Mesh::with_capacity(4 * n, 8 * n);

    let outer_bottom = add_ring(&mut mesh, &outer[..n], 0.0);
    let outer_top = add_ring(&mut mesh, &outer[..n], depth);
    let hole_bottom = add_ring(&mut mesh, &hole[..n], 0.0);
    let hole_top = add_ring(&mut mesh, &hole[..n], depth);

    for i in 0..n {
        let next = (i + 1) % n;
        add_face(&mut mesh, outer_bottom[i], hole_bottom[next], outer_bottom[next]);
        add_face(&mut mesh, outer_bottom[i], hole_bottom[i], hole_bottom[next]);
    }
    for i in 0..n {
        let next = (i + 1) % n;
        add_face(&mut mesh, outer_top[i], outer_top[next], hole_top[next]);
        add_face(&mut mesh, outer_top[i], hole_top[next], hole_top[i]);
    }
    add_walls(&mut mesh, &outer_bottom, &outer_top, true);
    add_walls(&mut mesh, &hole_bottom, &hole_top, false);

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{check_mesh, is_closed};
    use crate::utils::math::triangle_normal;

    fn square(half: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(-half, -half),
            Point2::new(half, -half),
            Point2::new(half, half),
            Point2::new(-half, half),
        ]
    }

    #[test]
    fn test_closing_point_is_dropped() {
        let mut outline = square(1.0);
        outline.push(outline[0]);
        let mesh = extrude_star(&outline, Point2::origin(), 1.0);
        assert_eq!(mesh.vertex_count(), 2 + 2 * 4);
        assert_eq!(mesh.triangle_count(), 16);
    }

    #[test]
    fn test_star_prism_is_closed_and_clean() {
        let mesh = extrude_star(&square(1.0), Point2::origin(), 2.0);
        assert!(is_closed(&mesh).unwrap());
        assert!(check_mesh(&mesh).unwrap().is_empty());
    }

    #[test]
    fn test_star_faces_point_outward() {
        let mesh = extrude_star(&square(1.0), Point2::origin(), 2.0);
        let centroid = Point3::new(0.0, 0.0, 1.0);
        for triangle in mesh.triangles() {
            let [a, b, c] = mesh.corners(&triangle);
            let normal = triangle_normal(&a, &b, &c);
            let face_center = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            assert!(normal.dot(&(face_center - centroid)) > 0.0);
        }
    }

    #[test]
    fn test_frame_is_closed_and_faces_point_away_from_material() {
        let mesh = extrude_frame(&square(2.0), &square(1.0), 1.0);
        assert!(is_closed(&mesh).unwrap());
        assert!(check_mesh(&mesh).unwrap().is_empty());
        assert_eq!(mesh.triangle_count(), 8 * 4);

        // Hole walls face the axis, outer walls face away from it.
        for triangle in mesh.triangles() {
            let [a, b, c] = mesh.corners(&triangle);
            let normal = triangle_normal(&a, &b, &c);
            if normal.z.abs() > 0.5 {
                continue;
            }
            let face_center = (a.coords + b.coords + c.coords) / 3.0;
            let radial = face_center.x.abs().max(face_center.y.abs());
            let outward = normal.x * face_center.x + normal.y * face_center.y;
            if radial > 1.5 {
                assert!(outward > 0.0);
            } else {
                assert!(outward < 0.0);
            }
        }
    }

    #[test]
    fn test_frame_welds_zero_length_edges() {
        // The hole's last point repeats its first, as in a slot of width 2r.
        let outer = square(2.0);
        let hole = vec![
            Point2::new(0.0, -1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, -1.0),
        ];
        let mesh = extrude_frame(&outer, &hole, 1.0);
        assert_eq!(mesh.vertex_count(), 2 * 4 + 2 * 3);
        assert_eq!(mesh.triangle_count(), 8 * 4 - 4);
        assert!(is_closed(&mesh).unwrap());
        assert!(check_mesh(&mesh).unwrap().is_empty());
    }
}
