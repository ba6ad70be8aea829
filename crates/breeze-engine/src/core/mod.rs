pub mod easing;
pub mod preset;
pub mod rig;
pub mod schedule;
pub mod sim;
pub mod state;
pub mod time;
