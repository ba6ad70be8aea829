// core/sim.rs
//
// The per-frame animation state updater. Owns the scalar rig state and the
// pending drift retarget; writes pose values into a RigPose each step. No
// rendering types anywhere — the pose is the whole output.

use std::f32::consts::FRAC_PI_2;

use crate::api::config::FanConfig;
use crate::api::types::UiEvent;
use crate::core::easing::lerp;
use crate::core::preset::SpeedPreset;
use crate::core::rig::RigPose;
use crate::core::schedule::DriftSchedule;
use crate::core::state::FanState;
use crate::input::queue::{ControlEvent, InputQueue};

// ── UI event kinds to the page ───────────────────────────────────────

/// a = active control code (see ActiveControl::code).
pub const EVENT_ACTIVE_CONTROL: f32 = 1.0;
/// a = target blade speed, b = sweeping (0/1), c = animation clock.
pub const EVENT_RIG_STATE: f32 = 2.0;

// ── Frame constants (per fixed step) ─────────────────────────────────

/// Blend factor easing blade speed toward its target.
const BLADE_ACCEL: f32 = 0.02;
/// Blend factor easing head yaw speed toward its (inert) target.
const YAW_ACCEL: f32 = 0.05;
/// Coarse blend chasing the drift targets.
const POSITION_CHASE: f32 = 0.02;
/// Animation clock advance per step.
const CLOCK_STEP: f32 = 0.03;
/// Bobbing amplitude in world units.
const FLOAT_AMPLITUDE: f32 = 0.2;

/// Which button the page should show as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveControl {
    /// No button highlighted (unrecognized speed value).
    #[default]
    None,
    StopAll,
    ToggleHead,
    Slow,
    Medium,
    Fast,
}

impl ActiveControl {
    /// Numeric code reported in the active-control UI event and the
    /// protocol header.
    pub fn code(self) -> f32 {
        match self {
            ActiveControl::None => -1.0,
            ActiveControl::StopAll => 0.0,
            ActiveControl::ToggleHead => 1.0,
            ActiveControl::Slow => 2.0,
            ActiveControl::Medium => 3.0,
            ActiveControl::Fast => 4.0,
        }
    }
}

/// The animation state updater for the fan rig.
///
/// Control operations only touch target fields; `tick` moves the current
/// fields toward them. The two never race because both run on the same
/// logical thread, with input drained between frames.
pub struct FanSim {
    config: FanConfig,
    state: FanState,
    schedule: DriftSchedule,
    active: ActiveControl,
    /// UI events emitted during the current frame.
    events: Vec<UiEvent>,
}

impl FanSim {
    /// The rig powers up already running at the medium preset.
    pub fn new(config: FanConfig) -> Self {
        let mut sim = Self {
            state: FanState::new(config.home_vec()),
            schedule: DriftSchedule::new(),
            active: ActiveControl::None,
            events: Vec::new(),
            config,
        };
        let default_speed = sim.state.target_blade_speed;
        sim.set_speed(default_speed);
        sim
    }

    pub fn state(&self) -> &FanState {
        &self.state
    }

    pub fn active_control(&self) -> ActiveControl {
        self.active
    }

    /// Whether a drift retarget is waiting for its delay to elapse.
    pub fn is_retarget_pending(&self) -> bool {
        self.schedule.is_armed()
    }

    /// A fresh pose at the rig's home position, with the blades unspun.
    pub fn home_pose(&self) -> RigPose {
        RigPose::new(self.state.home)
    }

    // ── Control operations ───────────────────────────────────────────

    /// Select a blade speed. Recognized preset speeds pick their smoothing
    /// factor and arm the delayed drift retarget; anything else falls into
    /// the stop branch: smoothing 0.05, targets reset to home immediately,
    /// no pending retarget. The raw speed is kept as the target either way.
    pub fn set_speed(&mut self, speed: f32) {
        let preset = SpeedPreset::from_speed(speed);
        self.state.target_blade_speed = speed;
        self.state.smoothness = preset.smoothness();

        if preset == SpeedPreset::Stop {
            self.schedule.cancel();
            self.state.target_y = self.state.home.y;
            self.state.target_z = self.state.home.z;
        } else {
            self.schedule.arm(preset, self.config.retarget_delay);
        }

        self.active = match preset {
            SpeedPreset::Stop => ActiveControl::None,
            SpeedPreset::Slow => ActiveControl::Slow,
            SpeedPreset::Medium => ActiveControl::Medium,
            SpeedPreset::Fast => ActiveControl::Fast,
        };
        log::debug!("speed set to {speed} ({preset:?})");
    }

    /// Toggle head oscillation. A stopped fan ignores the toggle.
    pub fn toggle_head_sweep(&mut self) {
        if self.state.target_blade_speed > 0.0 {
            self.state.sweeping = !self.state.sweeping;
            self.active = ActiveControl::ToggleHead;
        }
    }

    /// Stop everything: blades wind down, the sweep halts where it is, the
    /// animation clock restarts from zero.
    pub fn stop_all(&mut self) {
        self.set_speed(0.0);
        self.state.sweeping = false;
        self.state.elapsed = 0.0;
        self.active = ActiveControl::StopAll;
    }

    /// Apply queued control events. Called once per frame, before stepping.
    pub fn handle_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                ControlEvent::StopAll => self.stop_all(),
                ControlEvent::ToggleHead => self.toggle_head_sweep(),
                ControlEvent::SetSpeed { speed } => self.set_speed(speed),
                ControlEvent::Unknown { .. } => {}
            }
        }
    }

    // ── Per-step update ──────────────────────────────────────────────

    /// Advance one fixed step and write the resulting pose.
    pub fn tick(&mut self, pose: &mut RigPose) {
        // Apply a drift retarget whose delay just elapsed.
        if let Some(preset) = self.schedule.tick(self.config.fixed_dt) {
            let (dy, dz) = preset.drift();
            self.state.target_y = self.state.home.y + dy;
            self.state.target_z = self.state.home.z + dz;
        }

        let state = &mut self.state;

        // Spin the blades, then ease both speeds toward their targets.
        pose.blade_spin -= state.blade_speed;
        state.blade_speed = lerp(state.blade_speed, state.target_blade_speed, BLADE_ACCEL);
        state.head_yaw_speed = lerp(state.head_yaw_speed, state.target_head_yaw_speed, YAW_ACCEL);

        // Sweep the head between ±90°, flipping direction past a bound.
        // The pose only sees the yaw while sweeping is on.
        if state.sweeping {
            state.head_yaw += state.head_yaw_speed * state.head_direction;
            if state.head_yaw > FRAC_PI_2 || state.head_yaw < -FRAC_PI_2 {
                state.head_direction = -state.head_direction;
            }
            pose.head_yaw = state.head_yaw;
        }

        // Coarse pass: chase the drift targets.
        state.position.y = lerp(state.position.y, state.target_y, POSITION_CHASE);
        state.position.z = lerp(state.position.z, state.target_z, POSITION_CHASE);

        // Fine pass: bob around the target while the fan runs. Layering a
        // second, preset-paced blend over the coarse one gives the
        // decelerating approach to a gently bobbing rest position.
        state.elapsed += CLOCK_STEP;
        let float_offset = if state.target_blade_speed == 0.0 {
            0.0
        } else {
            state.elapsed.sin() * FLOAT_AMPLITUDE
        };
        state.position.y = lerp(
            state.position.y,
            state.target_y + float_offset,
            state.smoothness,
        );
        state.position.z = lerp(
            state.position.z,
            state.target_z + float_offset,
            state.smoothness,
        );

        pose.position = state.position;

        self.emit_frame_events();
    }

    // ── UI events ────────────────────────────────────────────────────

    fn emit_frame_events(&mut self) {
        if self.events.len() + 2 > self.config.max_events {
            return;
        }
        self.events.push(UiEvent {
            kind: EVENT_ACTIVE_CONTROL,
            a: self.active.code(),
            b: 0.0,
            c: 0.0,
        });
        self.events.push(UiEvent {
            kind: EVENT_RIG_STATE,
            a: self.state.target_blade_speed,
            b: if self.state.sweeping { 1.0 } else { 0.0 },
            c: self.state.elapsed,
        });
    }

    /// UI events emitted since the last clear.
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    /// Clear per-frame transient data. Called by the runner each frame.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sim() -> FanSim {
        FanSim::new(FanConfig::default())
    }

    /// Steps needed to cover the retarget delay, plus slack.
    fn delay_steps(sim: &FanSim) -> usize {
        (sim.config.retarget_delay / sim.config.fixed_dt) as usize + 2
    }

    fn run(sim: &mut FanSim, pose: &mut RigPose, steps: usize) {
        for _ in 0..steps {
            sim.tick(pose);
        }
    }

    #[test]
    fn powers_on_at_medium() {
        let sim = sim();
        assert_eq!(sim.state().target_blade_speed, 0.20);
        assert_eq!(sim.state().smoothness, 0.03);
        assert!(sim.state().sweeping);
        assert!(sim.is_retarget_pending());
        assert_eq!(sim.active_control(), ActiveControl::Medium);
    }

    #[test]
    fn preset_mapping_sets_target_and_smoothness() {
        let cases = [
            (0.0, 0.05, ActiveControl::None),
            (0.10, 0.0001, ActiveControl::Slow),
            (0.20, 0.03, ActiveControl::Medium),
            (0.40, 0.05, ActiveControl::Fast),
        ];
        for (speed, smoothness, active) in cases {
            let mut sim = sim();
            sim.set_speed(speed);
            assert_eq!(sim.state().target_blade_speed, speed);
            assert_eq!(sim.state().smoothness, smoothness, "speed {speed}");
            assert_eq!(sim.active_control(), active, "speed {speed}");
        }
    }

    #[test]
    fn set_speed_is_idempotent() {
        let mut once = sim();
        once.set_speed(0.20);

        let mut twice = sim();
        twice.set_speed(0.20);
        twice.set_speed(0.20);

        assert_eq!(once.state(), twice.state());
        assert_eq!(once.active_control(), twice.active_control());
    }

    #[test]
    fn unknown_speed_takes_stop_branch_but_keeps_raw_target() {
        let mut sim = sim();
        sim.set_speed(0.33);
        assert_eq!(sim.state().target_blade_speed, 0.33);
        assert_eq!(sim.state().smoothness, 0.05);
        assert_eq!(sim.state().target_y, sim.state().home.y);
        assert_eq!(sim.state().target_z, sim.state().home.z);
        assert!(!sim.is_retarget_pending());
        assert_eq!(sim.active_control(), ActiveControl::None);
    }

    #[test]
    fn stop_all_resets_everything() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.set_speed(0.20);
        run(&mut sim, &mut pose, 10);
        assert!(sim.state().elapsed > 0.0);

        sim.stop_all();
        assert_eq!(sim.state().target_blade_speed, 0.0);
        assert!(!sim.state().sweeping);
        assert_eq!(sim.state().elapsed, 0.0);
        assert_eq!(sim.active_control(), ActiveControl::StopAll);
        assert!(!sim.is_retarget_pending());
    }

    #[test]
    fn toggle_is_noop_when_stopped() {
        let mut sim = sim();
        sim.set_speed(0.0);
        let before = sim.state().sweeping;
        sim.toggle_head_sweep();
        assert_eq!(sim.state().sweeping, before);
    }

    #[test]
    fn toggle_flips_while_running() {
        let mut sim = sim();
        assert!(sim.state().sweeping);
        sim.toggle_head_sweep();
        assert!(!sim.state().sweeping);
        sim.toggle_head_sweep();
        assert!(sim.state().sweeping);
    }

    #[test]
    fn yaw_crossing_bound_flips_direction_once() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.state.head_yaw = FRAC_PI_2 - 0.001;
        sim.state.head_direction = 1.0;

        sim.tick(&mut pose);
        assert!(sim.state().head_yaw > FRAC_PI_2);
        assert_eq!(sim.state().head_direction, -1.0);

        // The next step comes back inside the bound without flipping again.
        sim.tick(&mut pose);
        assert!(sim.state().head_yaw <= FRAC_PI_2);
        assert_eq!(sim.state().head_direction, -1.0);
    }

    #[test]
    fn yaw_stays_bounded_over_long_runs() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        // Generous bound: the yaw may overshoot by at most one step.
        let limit = FRAC_PI_2 + sim.state().head_yaw_speed * 1.5;
        for _ in 0..5000 {
            sim.tick(&mut pose);
            assert!(sim.state().head_yaw.abs() <= limit, "yaw escaped bound");
        }
    }

    #[test]
    fn pose_yaw_frozen_while_sweep_is_off() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        run(&mut sim, &mut pose, 50);
        sim.toggle_head_sweep();
        let frozen = pose.head_yaw;
        run(&mut sim, &mut pose, 50);
        assert_eq!(pose.head_yaw, frozen);
    }

    #[test]
    fn blade_speed_settles_toward_target() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.set_speed(0.40);
        run(&mut sim, &mut pose, 600);
        assert!((sim.state().blade_speed - 0.40).abs() < 1e-3);
        // The accumulated spin is negative: the blades turn clockwise.
        assert!(pose.blade_spin < 0.0);
    }

    #[test]
    fn fast_drift_applies_after_delay() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.set_speed(0.40);
        let steps = delay_steps(&sim);
        run(&mut sim, &mut pose, steps);

        let home = sim.state().home;
        assert_eq!(sim.state().target_y, home.y + 5.0);
        assert_eq!(sim.state().target_z, home.z - 9.5);
        assert!(!sim.is_retarget_pending());
    }

    #[test]
    fn newer_preset_supersedes_pending_drift() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.set_speed(0.40);
        run(&mut sim, &mut pose, 10); // well inside the delay
        sim.set_speed(0.10);

        let home = sim.state().home;
        let fast = (home.y + 5.0, home.z - 9.5);
        let steps = delay_steps(&sim);
        for _ in 0..steps {
            sim.tick(&mut pose);
            let targets = (sim.state().target_y, sim.state().target_z);
            assert_ne!(targets, fast, "stale fast drift applied");
        }
        assert_eq!(sim.state().target_y, home.y + 1.0);
        assert_eq!(sim.state().target_z, home.z);
    }

    #[test]
    fn stop_cancels_pending_drift_and_rehomes() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.set_speed(0.40);
        run(&mut sim, &mut pose, 10);
        sim.set_speed(0.0);

        let steps = delay_steps(&sim);
        run(&mut sim, &mut pose, steps);
        let home = sim.state().home;
        assert_eq!(sim.state().target_y, home.y);
        assert_eq!(sim.state().target_z, home.z);
    }

    #[test]
    fn stopped_fan_settles_home_without_bobbing() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.set_speed(0.40);
        let steps = delay_steps(&sim) + 200;
        run(&mut sim, &mut pose, steps);
        sim.stop_all();
        run(&mut sim, &mut pose, 2000);

        let home = sim.state().home;
        assert!(sim.state().is_stopped());
        assert!((pose.position.y - home.y).abs() < 0.05);
        assert!((pose.position.z - home.z).abs() < 0.05);
    }

    #[test]
    fn running_fan_bobs_around_its_target() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.set_speed(0.20);
        let steps = delay_steps(&sim) + 1500;
        run(&mut sim, &mut pose, steps);

        // Position oscillates near target_y with the bobbing amplitude.
        let target_y = sim.state().target_y;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for _ in 0..500 {
            sim.tick(&mut pose);
            min_y = min_y.min(pose.position.y);
            max_y = max_y.max(pose.position.y);
        }
        assert!(max_y > min_y, "no bobbing observed");
        assert!((min_y - target_y).abs() < 0.5);
        assert!((max_y - target_y).abs() < 0.5);
    }

    #[test]
    fn head_yaw_speed_target_is_inert() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        let target = sim.state().target_head_yaw_speed;
        sim.set_speed(0.40);
        sim.toggle_head_sweep();
        sim.stop_all();
        run(&mut sim, &mut pose, 300);
        assert_eq!(sim.state().target_head_yaw_speed, target);
        assert!((sim.state().head_yaw_speed - target).abs() < 1e-6);
    }

    #[test]
    fn handle_input_decodes_controls() {
        let mut sim = sim();
        let mut input = InputQueue::new();
        input.push(ControlEvent::SetSpeed { speed: 0.40 });
        input.push(ControlEvent::ToggleHead);
        input.push(ControlEvent::Unknown { kind: 99, value: 1.0 });
        sim.handle_input(&input);

        assert_eq!(sim.state().target_blade_speed, 0.40);
        assert!(!sim.state().sweeping);
    }

    #[test]
    fn events_emitted_each_step_and_cleared_per_frame() {
        let mut sim = sim();
        let mut pose = sim.home_pose();
        sim.tick(&mut pose);
        let kinds: Vec<f32> = sim.events().iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&EVENT_ACTIVE_CONTROL));
        assert!(kinds.contains(&EVENT_RIG_STATE));

        sim.clear_frame_data();
        assert!(sim.events().is_empty());
    }

    #[test]
    fn event_emission_respects_capacity() {
        let config = FanConfig {
            max_events: 3,
            ..FanConfig::default()
        };
        let mut sim = FanSim::new(config);
        let mut pose = sim.home_pose();
        run(&mut sim, &mut pose, 10);
        assert!(sim.events().len() <= 3);
    }

    #[test]
    fn custom_home_position_is_respected() {
        let config = FanConfig {
            home: [1.0, 3.0, -2.0],
            ..FanConfig::default()
        };
        let sim = FanSim::new(config);
        assert_eq!(sim.state().home, Vec3::new(1.0, 3.0, -2.0));
        assert_eq!(sim.state().target_y, 3.0);
        assert_eq!(sim.state().target_z, -2.0);
    }
}
