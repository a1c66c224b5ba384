// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL export

mod exporter;

pub use exporter::{export_stl, export_stl_string, write_stl, DEFAULT_SOLID_NAME};
