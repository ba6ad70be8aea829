use crate::core::preset::SpeedPreset;

/// A pending drift retarget armed by a speed change.
///
/// The original rig armed a fire-and-forget real-time timer per speed
/// change and let stale callbacks race a newer selection. Here at most one
/// retarget is pending at a time, keyed by the preset that armed it, and
/// counted down in fixed simulation steps: arming replaces the previous
/// retarget, so the drift targets applied always belong to the most recent
/// preset.
#[derive(Debug, Default)]
pub struct DriftSchedule {
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    preset: SpeedPreset,
    remaining: f32,
}

impl DriftSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a retarget for `preset` after `delay` seconds, replacing any
    /// pending one.
    pub fn arm(&mut self, preset: SpeedPreset, delay: f32) {
        self.pending = Some(Pending {
            preset,
            remaining: delay,
        });
    }

    /// Drop any pending retarget.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The preset that will be applied when the delay elapses.
    pub fn armed_preset(&self) -> Option<SpeedPreset> {
        self.pending.map(|p| p.preset)
    }

    /// Advance by one fixed step. Returns the preset whose drift targets
    /// should be applied, if the delay just elapsed.
    pub fn tick(&mut self, dt: f32) -> Option<SpeedPreset> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= dt;
        if pending.remaining <= 0.0 {
            let preset = pending.preset;
            self.pending = None;
            Some(preset)
        } else {
            None
        }
    }
}
