//! Physical readouts derived from engine snapshots.
//!
//! These are the formulas the display layer shows next to the canvas
//! (current, mean free time, drift velocity, mobility, current density).
//! They are pure functions of [`EngineSnapshot`] values plus the user's
//! slider inputs; the engine itself never calls into this module.

use crate::core::EngineSnapshot;
use serde::{Deserialize, Serialize};

/// Elementary charge [C].
pub const ELECTRON_CHARGE: f64 = 1.602e-19;
/// Electron rest mass [kg].
pub const ELECTRON_MASS: f64 = 9.109e-31;
/// Scale from the volume input to m^3.
pub const VOLUME_SCALE: f64 = 1e-25;
/// Physical seconds represented by one tick at one frame per second.
pub const TIME_SCALE: f64 = 1e-14;
/// m^2 -> cm^2.
pub const TO_CM2: f64 = 1e4;
/// m -> um.
pub const TO_UM: f64 = 1e6;
/// m^2 -> mm^2.
pub const TO_MM2: f64 = 1e6;
/// Display frame rate; one engine step per frame.
pub const FPS: f64 = 60.0;
/// Frames between two readout refreshes.
pub const UPDATE_EVERY_N: u32 = 30;
/// Divisor from slider units to engine units for field and suppression.
pub const SLIDER_SCALE: f64 = 10.0;

/// Per-tick acceleration for a field-strength slider value.
#[inline]
pub fn acceleration_from_field(field_strength: f64) -> f64 {
    field_strength / SLIDER_SCALE
}

/// Per-tick collision probability for a suppression slider value.
#[inline]
pub fn suppression_from_slider(suppression: f64) -> f64 {
    suppression / SLIDER_SCALE
}

/// Mean free time [s] from the engine's mean collision interval in ticks.
#[inline]
pub fn mean_free_time(mean_ticks: f64) -> f64 {
    mean_ticks * TIME_SCALE / FPS
}

/// Drift velocity [um/s] for a field strength and mean free time.
#[inline]
pub fn drift_velocity(field_strength: f64, tau: f64) -> f64 {
    ELECTRON_CHARGE * field_strength * tau * TO_UM / ELECTRON_MASS
}

/// Electron mobility [cm^2/(V s)] for a mean free time.
#[inline]
pub fn mobility(tau: f64) -> f64 {
    ELECTRON_CHARGE * tau * TO_CM2 / ELECTRON_MASS
}

/// Current density [A/mm^2]. Zero for a non-positive volume.
pub fn current_density(
    electron_count: usize,
    volume: f64,
    mobility: f64,
    field_strength: f64,
) -> f64 {
    if volume <= 0.0 {
        return 0.0;
    }
    ELECTRON_CHARGE * electron_count as f64 / (volume * VOLUME_SCALE) * mobility * field_strength
        / TO_MM2
}

/// Current [A] from the net number of rightward crossings over `window_ticks` frames.
pub fn current(net_crossings: i64, window_ticks: u32) -> f64 {
    if window_ticks == 0 {
        return 0.0;
    }
    net_crossings as f64 * ELECTRON_CHARGE / (window_ticks as f64 / FPS)
}

/// Slider values that feed the derived quantities but not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellInputs {
    /// Field-strength slider value.
    pub field_strength: f64,
    /// Sample volume input.
    pub volume: f64,
}

/// One refresh of the readout panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readouts {
    pub left_count: u64,
    pub right_count: u64,
    /// Right minus left crossings during the last window.
    pub net_crossings: i64,
    pub current: f64,
    pub mean_free_time: f64,
    pub drift_velocity: f64,
    pub mobility: f64,
    pub current_density: f64,
}

impl Readouts {
    /// Compute readouts for a snapshot, given the net crossings observed over
    /// a window of `window_ticks` frames.
    pub fn compute(
        snapshot: &EngineSnapshot,
        net_crossings: i64,
        window_ticks: u32,
        inputs: &ShellInputs,
    ) -> Self {
        let tau = mean_free_time(snapshot.mean_collision_interval);
        let mu = mobility(tau);
        Self {
            left_count: snapshot.left_count,
            right_count: snapshot.right_count,
            net_crossings,
            current: current(net_crossings, window_ticks),
            mean_free_time: tau,
            drift_velocity: drift_velocity(inputs.field_strength, tau),
            mobility: mu,
            current_density: current_density(
                snapshot.electron_count,
                inputs.volume,
                mu,
                inputs.field_strength,
            ),
        }
    }
}

/// Emits [`Readouts`] once every `every` observed ticks, measuring crossings
/// over that window.
#[derive(Debug, Clone)]
pub struct ReadoutSampler {
    every: u32,
    since: u32,
    last_left: u64,
    last_right: u64,
}

impl Default for ReadoutSampler {
    fn default() -> Self {
        Self::new(UPDATE_EVERY_N)
    }
}

impl ReadoutSampler {
    /// `every` is clamped to at least one tick.
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            since: 0,
            last_left: 0,
            last_right: 0,
        }
    }

    /// Feed the snapshot taken after a step. Returns readouts at the end of
    /// each window.
    ///
    /// Counters that went backwards mean the engine was replaced; a fresh
    /// engine counts from zero, so the baseline drops to zero.
    pub fn observe(&mut self, snapshot: &EngineSnapshot, inputs: &ShellInputs) -> Option<Readouts> {
        if snapshot.left_count < self.last_left || snapshot.right_count < self.last_right {
            self.last_left = 0;
            self.last_right = 0;
        }
        self.since += 1;
        if self.since < self.every {
            return None;
        }

        let d_left = snapshot.left_count - self.last_left;
        let d_right = snapshot.right_count - self.last_right;
        let net = d_right as i64 - d_left as i64;
        let readouts = Readouts::compute(snapshot, net, self.every, inputs);

        self.last_left = snapshot.left_count;
        self.last_right = snapshot.right_count;
        self.since = 0;
        Some(readouts)
    }

    /// Restart the window from `snapshot`'s counters.
    pub fn rebase(&mut self, snapshot: &EngineSnapshot) {
        self.last_left = snapshot.left_count;
        self.last_right = snapshot.right_count;
        self.since = 0;
    }
}
