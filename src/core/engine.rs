use crate::config::TransportConfig;
use crate::core::boundary::BoundaryTracker;
use crate::core::electron::{self, Electron};
use crate::core::lattice::{self, Ion};
use crate::core::scattering::ScatteringModel;
use crate::core::stats::StatisticsAggregator;
use crate::core::DIM;
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

/// Counter readout taken after a step; what the display layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Steps taken since construction.
    pub ticks: u64,
    /// Number of electrons in the pool.
    pub electron_count: usize,
    /// Cumulative left-edge crossings.
    pub left_count: u64,
    /// Cumulative right-edge crossings.
    pub right_count: u64,
    /// Collisions recorded so far.
    pub collision_count: u64,
    /// Mean ticks between collisions (0 before the first collision).
    pub mean_collision_interval: f64,
}

/// Drude transport engine: a fixed ion lattice, a pool of electrons and the
/// counters derived from their motion.
///
/// Each [`step`](Self::step) integrates, wraps at the periodic boundary and
/// then runs the scattering trial, for the whole population in that order.
/// All randomness comes from one engine-owned `StdRng`.
#[derive(Debug)]
pub struct TransportEngine {
    config: TransportConfig,
    ions: Vec<Ion>,
    electrons: Vec<Electron>,
    boundary: BoundaryTracker,
    stats: StatisticsAggregator,
    scattering: ScatteringModel,
    rng: StdRng,
    ticks: u64,
}

impl TransportEngine {
    /// Build an engine for a `width` x `height` area with default ion radius and
    /// collision policy.
    ///
    /// Errors: `Error::InvalidParameter` on non-positive spacing or area, or a
    /// negative initial speed.
    pub fn new(
        width: f64,
        height: f64,
        ion_spacing: f64,
        initial_speed: f64,
        electron_count: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut config =
            TransportConfig::new(width, height, ion_spacing, initial_speed, electron_count);
        config.seed = seed;
        Self::from_config(&config)
    }

    /// Build an engine from a full configuration.
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        if !config.initial_speed.is_finite() || config.initial_speed < 0.0 {
            return Err(Error::InvalidParameter(
                "initial_speed must be finite and >= 0".into(),
            ));
        }
        let ions = lattice::generate_with_margin(
            config.width,
            config.height,
            config.ion_spacing,
            config.ion_radius,
        )?;

        let seed = match config.seed {
            Some(s) => s,
            None => rng().random(),
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let electrons = electron::initialize(
            config.width,
            config.height,
            config.electron_count,
            config.initial_speed,
            &mut rng,
        )?;

        debug!(
            ions = ions.len(),
            electrons = electrons.len(),
            seed,
            policy = ?config.post_collision,
            "transport engine constructed"
        );

        Ok(Self {
            config: config.clone(),
            ions,
            electrons,
            boundary: BoundaryTracker::new(),
            stats: StatisticsAggregator::new(),
            scattering: ScatteringModel::new(config.post_collision, config.initial_speed),
            rng,
            ticks: 0,
        })
    }

    /// Discard all state and rebuild from `config`.
    ///
    /// On error the engine is left exactly as it was.
    pub fn reset(&mut self, config: &TransportConfig) -> Result<()> {
        let fresh = Self::from_config(config)?;
        info!(
            previous_ticks = self.ticks,
            electrons = fresh.electrons.len(),
            "transport engine reset"
        );
        *self = fresh;
        Ok(())
    }

    /// Advance the simulation by one tick.
    ///
    /// `acceleration` acts along +x; a non-finite value is ignored (treated as 0).
    /// `suppression` is the per-tick collision probability, clamped into `[0, 1]`.
    pub fn step(&mut self, acceleration: f64, suppression: f64) {
        let acceleration = if acceleration.is_finite() {
            acceleration
        } else {
            warn!(acceleration, "ignoring non-finite acceleration");
            0.0
        };
        let p = ScatteringModel::probability(suppression);
        let (width, height) = (self.config.width, self.config.height);

        electron::integrate(&mut self.electrons, acceleration);
        for e in self.electrons.iter_mut() {
            self.boundary.apply(e, width, height);
        }
        for e in self.electrons.iter_mut() {
            self.scattering.scatter(e, p, &mut self.rng, &mut self.stats);
        }

        self.ticks += 1;
        trace!(
            tick = self.ticks,
            left = self.boundary.left_count(),
            right = self.boundary.right_count(),
            collisions = self.stats.count(),
            "step"
        );
    }

    /// Overwrite one electron's kinematic state (its scattering timer is kept).
    ///
    /// Errors: `Error::InvalidParameter` if `index` is out of range, a value is
    /// not finite, or the position lies outside the area.
    pub fn set_electron_state(
        &mut self,
        index: usize,
        position: [f64; DIM],
        velocity: [f64; DIM],
    ) -> Result<()> {
        let n = self.electrons.len();
        if index >= n {
            return Err(Error::InvalidParameter(format!(
                "electron index {index} out of range for {n} electrons"
            )));
        }
        if !position.iter().chain(velocity.iter()).all(|v| v.is_finite()) {
            return Err(Error::InvalidParameter(
                "electron position and velocity must be finite".into(),
            ));
        }
        if !(0.0..self.config.width).contains(&position[0])
            || !(0.0..self.config.height).contains(&position[1])
        {
            return Err(Error::InvalidParameter(format!(
                "electron position {position:?} lies outside the {}x{} area",
                self.config.width, self.config.height
            )));
        }
        let e = &mut self.electrons[index];
        e.position = position;
        e.velocity = velocity;
        Ok(())
    }

    pub fn ions(&self) -> &[Ion] {
        &self.ions
    }

    pub fn electrons(&self) -> &[Electron] {
        &self.electrons
    }

    /// Ion positions in generation order.
    pub fn ion_positions(&self) -> Vec<[f64; DIM]> {
        self.ions.iter().map(|i| i.position).collect()
    }

    /// Electron positions in pool order.
    pub fn electron_positions(&self) -> Vec<[f64; DIM]> {
        self.electrons.iter().map(|e| e.position).collect()
    }

    pub fn left_count(&self) -> u64 {
        self.boundary.left_count()
    }

    pub fn right_count(&self) -> u64 {
        self.boundary.right_count()
    }

    /// Mean ticks between collisions over all recorded collisions; 0 if none yet.
    pub fn mean_collision_interval(&self) -> f64 {
        self.stats.mean_interval()
    }

    pub fn collision_count(&self) -> u64 {
        self.stats.count()
    }

    /// Steps taken since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn width(&self) -> f64 {
        self.config.width
    }

    pub fn height(&self) -> f64 {
        self.config.height
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            ticks: self.ticks,
            electron_count: self.electrons.len(),
            left_count: self.left_count(),
            right_count: self.right_count(),
            collision_count: self.collision_count(),
            mean_collision_interval: self.mean_collision_interval(),
        }
    }
}
