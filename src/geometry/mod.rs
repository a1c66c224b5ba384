// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, checks and statistics

mod analytics;
mod bbox;
mod mesh;
mod mesh_utils;

pub use analytics::{analyze, MeshStats};
pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
pub use mesh_utils::{boundary_edge_count, check_mesh, is_closed, ValidationWarning};
