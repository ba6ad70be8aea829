pub mod api;
pub mod bridge;
pub mod core;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::FanConfig;
pub use api::types::UiEvent;
pub use bridge::protocol::ProtocolLayout;
pub use core::easing::{lerp, lerp_vec3};
pub use core::preset::SpeedPreset;
pub use core::rig::RigPose;
pub use core::schedule::DriftSchedule;
pub use core::sim::{ActiveControl, FanSim};
pub use core::state::FanState;
pub use core::time::FixedTimestep;
pub use input::queue::{
    ControlEvent, InputQueue, CONTROL_SET_SPEED, CONTROL_STOP_ALL, CONTROL_TOGGLE_HEAD,
};
