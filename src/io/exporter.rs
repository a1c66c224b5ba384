// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ASCII STL exporter

use crate::error::Result;
use crate::geometry::Mesh;
use crate::utils::math::triangle_normal;
use anyhow::Context;
use nalgebra::Matrix4;
use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;

/// Solid name used when the caller passes an empty one
pub const DEFAULT_SOLID_NAME: &str = "Exported";

/// Write `mesh` as ASCII STL into `out`.
///
/// Vertices are mapped through `transform` first. Facet normals come from the
/// transformed corners without a zero-length guard, so degenerate facets carry NaN.
pub fn write_stl<W: Write>(
    out: &mut W,
    mesh: &Mesh,
    transform: Option<&Matrix4<f64>>,
    name: &str,
) -> Result<()> {
    mesh.check_structure()?;

    let name = if name.is_empty() { DEFAULT_SOLID_NAME } else { name };
    let mesh = match transform {
        Some(matrix) => Cow::Owned(mesh.transformed(matrix)),
        None => Cow::Borrowed(mesh),
    };

    writeln!(out, "solid {}", name)?;
    for triangle in mesh.triangles() {
        let [a, b, c] = mesh.corners(&triangle);
        let n = triangle_normal(&a, &b, &c);

        writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(out, "    outer loop")?;
        for v in [a, b, c] {
            writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }
    writeln!(out, "endsolid {}", name)?;

    Ok(())
}

/// Serialize `mesh` to an ASCII STL string
pub fn export_stl_string(
    mesh: &Mesh,
    transform: Option<&Matrix4<f64>>,
    name: &str,
) -> Result<String> {
    // Seven lines per facet, roughly 40 bytes each
    let mut out = String::with_capacity(64 + mesh.triangle_count() * 280);
    write_stl(&mut out, mesh, transform, name)?;
    Ok(out)
}

/// Export `mesh` as ASCII STL to `path`
pub fn export_stl(
    mesh: &Mesh,
    transform: Option<&Matrix4<f64>>,
    name: &str,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let text = export_stl_string(mesh, transform, name)?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write STL file: {}", path.display()))?;
    Ok(())
}
