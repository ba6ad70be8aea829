use glam::Vec3;

use crate::core::preset::SpeedPreset;

/// The fan rig's animation state — plain scalars advanced every fixed step.
///
/// Target fields are only mutated by control operations (and the deferred
/// drift retarget); current fields evolve toward them inside `FanSim::tick`.
#[derive(Debug, Clone, PartialEq)]
pub struct FanState {
    /// Current blade angular speed, radians per step.
    pub blade_speed: f32,
    /// Speed the blades settle toward. Holds the raw value the UI sent,
    /// even when it is not a recognized preset.
    pub target_blade_speed: f32,

    /// Current head yaw, radians. Held within ±π/2 (up to one step of
    /// overshoot) while sweeping.
    pub head_yaw: f32,
    /// Sweep direction, +1.0 or -1.0.
    pub head_direction: f32,
    /// Yaw advance per step while sweeping.
    pub head_yaw_speed: f32,
    /// Inert: never reassigned after construction; `head_yaw_speed` still
    /// eases toward it each step, kept for parity with the original rig.
    pub target_head_yaw_speed: f32,
    /// Whether the head oscillates.
    pub sweeping: bool,

    /// Rig position; y/z chase `target_y`/`target_z`.
    pub position: Vec3,
    pub target_y: f32,
    pub target_z: f32,
    /// Resting position captured at construction.
    pub home: Vec3,

    /// Animation clock driving the bobbing sine.
    pub elapsed: f32,
    /// Per-preset blend factor for the bobbing pass.
    pub smoothness: f32,
}

impl FanState {
    /// Power-on state: blades already creeping, head sweeping, rig at home.
    /// `FanSim::new` immediately selects the medium preset on top of this.
    pub fn new(home: Vec3) -> Self {
        Self {
            blade_speed: 0.02,
            target_blade_speed: SpeedPreset::Medium.target_speed(),
            head_yaw: 0.0,
            head_direction: 1.0,
            head_yaw_speed: 0.01,
            target_head_yaw_speed: 0.01,
            sweeping: true,
            position: home,
            target_y: home.y,
            target_z: home.z,
            home,
            elapsed: 0.0,
            smoothness: 0.05,
        }
    }

    /// True once the blades have effectively wound down.
    pub fn is_stopped(&self) -> bool {
        self.target_blade_speed == 0.0 && self.blade_speed.abs() < 1e-4
    }

    /// The preset the current target speed corresponds to.
    pub fn preset(&self) -> SpeedPreset {
        SpeedPreset::from_speed(self.target_blade_speed)
    }
}
