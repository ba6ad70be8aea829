/// Discrete fan speed settings selectable from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedPreset {
    /// Blades wind down; rig settles back to its home position.
    Stop,
    Slow,
    /// Power-on default.
    #[default]
    Medium,
    Fast,
}

impl SpeedPreset {
    /// Blade speed the preset settles toward, in radians per step.
    pub fn target_speed(self) -> f32 {
        match self {
            SpeedPreset::Stop => 0.0,
            SpeedPreset::Slow => 0.10,
            SpeedPreset::Medium => 0.20,
            SpeedPreset::Fast => 0.40,
        }
    }

    /// Blend factor for the bobbing (float-offset) position pass.
    /// Slow barely follows the sine, so the rig hovers almost still.
    pub fn smoothness(self) -> f32 {
        match self {
            SpeedPreset::Slow => 0.0001,
            SpeedPreset::Medium => 0.03,
            SpeedPreset::Stop | SpeedPreset::Fast => 0.05,
        }
    }

    /// Drift applied to the rig's (y, z) targets once the retarget delay
    /// elapses. Stop drifts nowhere — its targets reset to home immediately.
    pub fn drift(self) -> (f32, f32) {
        match self {
            SpeedPreset::Stop => (0.0, 0.0),
            SpeedPreset::Slow => (1.0, 0.0),
            SpeedPreset::Medium => (2.0, -2.0),
            SpeedPreset::Fast => (5.0, -9.5),
        }
    }

    /// Map a raw speed value from the UI. Anything that is not exactly a
    /// known preset speed is normalized to the stop behavior.
    pub fn from_speed(speed: f32) -> Self {
        if speed == SpeedPreset::Slow.target_speed() {
            SpeedPreset::Slow
        } else if speed == SpeedPreset::Medium.target_speed() {
            SpeedPreset::Medium
        } else if speed == SpeedPreset::Fast.target_speed() {
            SpeedPreset::Fast
        } else {
            SpeedPreset::Stop
        }
    }
}
