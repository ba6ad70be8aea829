use glam::Vec3;

/// Pose values the simulation writes each step and the renderer consumes.
///
/// The actual scene graph (meshes, lights, camera, controls) lives on the
/// JS side; this struct is the opaque handle the animation math writes
/// into. Values persist between steps — `head_yaw` keeps its last written
/// angle while sweeping is disabled, matching how the real transform node
/// would simply stop being updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigPose {
    /// Accumulated blade rotation, radians. Decreases while the fan runs
    /// (the blades spin clockwise when seen from the front).
    pub blade_spin: f32,
    /// Head yaw around the vertical axis, radians.
    pub head_yaw: f32,
    /// Rig position in world units.
    pub position: Vec3,
}

impl RigPose {
    pub fn new(home: Vec3) -> Self {
        Self {
            blade_spin: 0.0,
            head_yaw: 0.0,
            position: home,
        }
    }
}
