use crate::core::DIM;
use crate::error::{Error, Result};
use rand::Rng;
use std::f64::consts::TAU;

/// A mobile charge carrier.
///
/// Fields:
/// - `position`: position vector [x, y], always inside the engine's area between steps
/// - `velocity`: velocity vector [vx, vy] in area units per tick
/// - `ticks_since_collision`: ticks elapsed since this electron last scattered
#[derive(Debug, Clone, PartialEq)]
pub struct Electron {
    /// Position (x, y).
    pub position: [f64; DIM],
    /// Velocity (vx, vy).
    pub velocity: [f64; DIM],
    /// Scattering timer; reset to 0 on every collision.
    pub ticks_since_collision: u64,
}

impl Electron {
    /// Create a new electron with a fresh scattering timer.
    pub fn new(position: [f64; DIM], velocity: [f64; DIM]) -> Self {
        Self {
            position,
            velocity,
            ticks_since_collision: 0,
        }
    }

    /// Euclidean speed |v|.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.iter().map(|&c| c * c).sum::<f64>().sqrt()
    }
}

/// Velocity of magnitude `speed` pointing in a uniformly random direction.
pub(crate) fn random_velocity<R: Rng + ?Sized>(speed: f64, rng: &mut R) -> [f64; DIM] {
    let angle: f64 = rng.random_range(0.0..TAU);
    [angle.cos() * speed, angle.sin() * speed]
}

/// Populate the electron pool.
///
/// Positions are drawn independently and uniformly in `[0, width) x [0, height)`;
/// overlaps are not excluded. Each velocity has magnitude `initial_speed` and a
/// uniformly random direction. For each electron the position is sampled before
/// the direction, so a given seed always yields the same pool.
///
/// Errors:
/// - `Error::InvalidParameter` if the area is degenerate or `initial_speed` is
///   negative or not finite.
pub fn initialize<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    count: usize,
    initial_speed: f64,
    rng: &mut R,
) -> Result<Vec<Electron>> {
    if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidParameter(
            "area width and height must be finite and > 0".into(),
        ));
    }
    if !initial_speed.is_finite() || initial_speed < 0.0 {
        return Err(Error::InvalidParameter(
            "initial_speed must be finite and >= 0".into(),
        ));
    }

    let mut electrons = Vec::with_capacity(count);
    for _ in 0..count {
        let position = [rng.random_range(0.0..width), rng.random_range(0.0..height)];
        let velocity = random_velocity(initial_speed, rng);
        electrons.push(Electron::new(position, velocity));
    }
    Ok(electrons)
}

/// Advance every electron by one tick of explicit Euler integration.
///
/// The field acts along +x: `vx += acceleration`, then `position += velocity`.
/// Velocity is updated first and saturates at `±f64::MAX` instead of overflowing.
pub fn integrate(electrons: &mut [Electron], acceleration: f64) {
    for e in electrons.iter_mut() {
        e.velocity[0] = (e.velocity[0] + acceleration).clamp(-f64::MAX, f64::MAX);
        for (r, &v) in e.position.iter_mut().zip(e.velocity.iter()) {
            *r += v;
        }
    }
}
