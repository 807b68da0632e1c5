use crate::core::electron::{random_velocity, Electron};
use crate::core::stats::StatisticsAggregator;
use crate::core::DIM;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a collision does to an electron's velocity.
///
/// Either way the post-collision velocity carries no memory of the drift
/// accumulated before the collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCollision {
    /// Velocity drops to zero.
    #[default]
    Rest,
    /// Velocity is redrawn with the initial speed in a uniformly random direction.
    Rethermalize,
}

/// Relaxation-time scattering: each tick every electron collides with
/// probability `suppression`.
#[derive(Debug, Clone, Copy)]
pub struct ScatteringModel {
    policy: PostCollision,
    initial_speed: f64,
}

impl ScatteringModel {
    pub fn new(policy: PostCollision, initial_speed: f64) -> Self {
        Self {
            policy,
            initial_speed,
        }
    }

    /// Map a raw suppression value onto a probability in `[0, 1]`.
    /// NaN and infinities collapse to the nearest meaningful value (NaN => 0).
    #[inline]
    pub fn probability(suppression: f64) -> f64 {
        if suppression.is_nan() {
            return 0.0;
        }
        suppression.clamp(0.0, 1.0)
    }

    /// Run one Bernoulli trial for `electron` with collision probability `p`
    /// (already clamped). Returns whether a collision occurred.
    ///
    /// On collision the interval since the previous collision, counting the
    /// current tick, is recorded into `stats` and the timer restarts at 0.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        electron: &mut Electron,
        p: f64,
        rng: &mut R,
        stats: &mut StatisticsAggregator,
    ) -> bool {
        if !rng.random_bool(p) {
            electron.ticks_since_collision = electron.ticks_since_collision.saturating_add(1);
            return false;
        }

        stats.record_interval(electron.ticks_since_collision.saturating_add(1));
        electron.ticks_since_collision = 0;
        electron.velocity = match self.policy {
            PostCollision::Rest => [0.0; DIM],
            PostCollision::Rethermalize => random_velocity(self.initial_speed, rng),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn probability_is_clamped() {
        assert_eq!(ScatteringModel::probability(-0.3), 0.0);
        assert_eq!(ScatteringModel::probability(0.25), 0.25);
        assert_eq!(ScatteringModel::probability(7.0), 1.0);
        assert_eq!(ScatteringModel::probability(f64::NAN), 0.0);
        assert_eq!(ScatteringModel::probability(f64::INFINITY), 1.0);
    }

    #[test]
    fn certain_collision_resets_velocity_and_timer() {
        let model = ScatteringModel::new(PostCollision::Rest, 2.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut stats = StatisticsAggregator::new();
        let mut e = Electron::new([1.0, 1.0], [5.0, -2.0]);
        e.ticks_since_collision = 6;

        assert!(model.scatter(&mut e, 1.0, &mut rng, &mut stats));
        assert_eq!(e.velocity, [0.0, 0.0]);
        assert_eq!(e.ticks_since_collision, 0);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.sum(), 7);
    }

    #[test]
    fn impossible_collision_advances_timer() {
        let model = ScatteringModel::new(PostCollision::Rest, 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        let mut stats = StatisticsAggregator::new();
        let mut e = Electron::new([1.0, 1.0], [5.0, 0.0]);

        for _ in 0..10 {
            assert!(!model.scatter(&mut e, 0.0, &mut rng, &mut stats));
        }
        assert_eq!(e.ticks_since_collision, 10);
        assert_eq!(e.velocity, [5.0, 0.0]);
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn rethermalize_keeps_initial_speed() {
        let model = ScatteringModel::new(PostCollision::Rethermalize, 3.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut stats = StatisticsAggregator::new();
        let mut e = Electron::new([1.0, 1.0], [40.0, 0.0]);

        assert!(model.scatter(&mut e, 1.0, &mut rng, &mut stats));
        assert!((e.speed() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn collision_rate_tracks_probability() {
        let model = ScatteringModel::new(PostCollision::Rest, 0.0);
        let mut rng = StdRng::seed_from_u64(99);
        let mut stats = StatisticsAggregator::new();
        let mut e = Electron::new([0.0, 0.0], [0.0, 0.0]);

        let trials = 20_000;
        for _ in 0..trials {
            model.scatter(&mut e, 0.2, &mut rng, &mut stats);
        }
        let rate = stats.count() as f64 / trials as f64;
        assert!((rate - 0.2).abs() < 0.02, "rate {rate}");
        // Geometric intervals: mean 1/p
        assert!((stats.mean_interval() - 5.0).abs() < 0.5);
    }
}
