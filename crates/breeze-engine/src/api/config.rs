use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for the fan simulation, provided by the host page.
/// Loaded from a JSON string at init; missing fields keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Rig home position (x, y, z) in world units.
    pub home: [f32; 3],
    /// Delay in seconds before a preset's drift targets are applied.
    pub retarget_delay: f32,
    /// Maximum number of UI events per frame.
    pub max_events: usize,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            home: [0.0, 1.0, 0.0],
            retarget_delay: 1.0,
            max_events: 32,
        }
    }
}

impl FanConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rig home position as a vector.
    pub fn home_vec(&self) -> Vec3 {
        Vec3::from(self.home)
    }
}
