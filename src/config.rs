use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub rings: RingConfig,
    pub nodes: NodeScaleConfig,
    pub forces: ForceConfig,
    pub loader: LoaderConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    pub base_radius: f32,
    pub ring_gap: f32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            base_radius: 80.0,
            ring_gap: 80.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeScaleConfig {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for NodeScaleConfig {
    fn default() -> Self {
        Self {
            min_radius: 6.0,
            max_radius: 28.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForceConfig {
    pub target_strength: f32,
    pub collision_padding: f32,
    pub collision_strength: f32,
    pub collision_iterations: usize,
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub convergence_threshold: f32,
    pub settle_tolerance: f32,
    pub max_settle_passes: usize,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            target_strength: 0.1,
            collision_padding: 6.0,
            collision_strength: 1.0,
            collision_iterations: 2,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            convergence_threshold: 0.002,
            settle_tolerance: 0.5,
            max_settle_passes: 600,
        }
    }
}

impl ForceConfig {
    pub fn alpha_decay(&self) -> f32 {
        1.0 - self.alpha_min.clamp(1e-6, 0.5).powf(1.0 / 300.0)
    }

    pub fn margin(&self) -> f32 {
        self.collision_padding.max(0.0) * 2.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingNumeric {
    #[default]
    Zero,
    Skip,
    Fail,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    pub missing_numeric: MissingNumeric,
}

impl LayoutConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid layout config JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout config {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse layout config {}", path.display()))
    }
}
