// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Job configuration: which shape to build and how to place and export it

use crate::io::DEFAULT_SOLID_NAME;
use crate::shapes::{GearParams, ShapeParameters};
use crate::utils::math::deg_to_rad;
use anyhow::{Context, Result};
use nalgebra::{Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// World transform applied at export time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Uniform scale factor
    pub scale: f64,
    /// Euler angles in degrees, applied as roll (X), pitch (Y), yaw (Z)
    pub rotate_deg: [f64; 3],
    pub translate: [f64; 3],
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotate_deg: [0.0; 3],
            translate: [0.0; 3],
        }
    }
}

impl TransformConfig {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Translation * rotation * scale, or `None` for the identity
    pub fn to_matrix(&self) -> Option<Matrix4<f64>> {
        if self.is_identity() {
            return None;
        }
        let [rx, ry, rz] = self.rotate_deg;
        let rotation = Rotation3::from_euler_angles(deg_to_rad(rx), deg_to_rad(ry), deg_to_rad(rz));
        let translation = Matrix4::new_translation(&Vector3::from(self.translate));
        Some(translation * rotation.to_homogeneous() * Matrix4::new_scaling(self.scale))
    }
}

/// A single generate-and-export job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Solid name written into the STL header
    pub name: String,
    /// Output STL path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub shape: ShapeParameters,
    pub transform: TransformConfig,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SOLID_NAME.to_string(),
            output: None,
            shape: ShapeParameters::Gear(GearParams::default()),
            transform: TransformConfig::default(),
        }
    }
}

impl JobConfig {
    /// Job for a built-in preset, named after it
    pub fn for_preset(name: &str) -> Result<Self> {
        let shape = ShapeParameters::preset(name)?;
        Ok(Self {
            name: shape.kind().to_string(),
            shape,
            ..Self::default()
        })
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read job file: {:?}", path.as_ref()))?;
        let config: JobConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse job file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `PARAMESH_SOLID_NAME` and `PARAMESH_OUTPUT`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("PARAMESH_SOLID_NAME") {
            self.name = name;
        }

        if let Ok(output) = std::env::var("PARAMESH_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize job")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write job file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
