// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel error type

use thiserror::Error;

/// Errors raised by shape generation, mesh checks and export.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A shape parameter would force an undefined numeric operation or an empty buffer.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The mesh buffers break the index-bounds or triangle-multiple invariants.
    #[error("malformed mesh: {0}")]
    MalformedMesh(String),

    #[error("unknown shape preset `{0}`")]
    UnknownPreset(String),

    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Result alias for kernel operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = GeometryError::invalid("teeth", 2.0, "must be at least 3");
        assert_eq!(
            err.to_string(),
            "invalid parameter `teeth` = 2: must be at least 3"
        );
    }
}
