//! Engine construction parameters and their TOML representation.

use crate::core::lattice::{self, ION_RADIUS};
use crate::core::scattering::PostCollision;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters a [`TransportEngine`](crate::core::TransportEngine) is built from.
///
/// Every field has a default, so a TOML document only needs the keys it
/// overrides:
///
/// ```
/// let cfg = drudesim::config::TransportConfig::from_toml_str(
///     "ion_spacing = 40.0\nelectron_count = 120\nseed = 7\n",
/// ).unwrap();
/// assert_eq!(cfg.width, 800.0);
/// assert_eq!(cfg.electron_count, 120);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// Area width.
    pub width: f64,
    /// Area height.
    pub height: f64,
    /// Distance between neighbouring lattice sites (> 0).
    pub ion_spacing: f64,
    /// Initial electron speed (>= 0).
    pub initial_speed: f64,
    /// Number of electrons; zero gives an empty engine. A negative count in
    /// TOML is rejected as `Error::InvalidParameter`.
    pub electron_count: usize,
    /// Ion radius, used as the lattice edge margin.
    pub ion_radius: f64,
    /// Velocity policy applied on collision.
    pub post_collision: PostCollision,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            ion_spacing: 50.0,
            initial_speed: 0.0,
            electron_count: 50,
            ion_radius: ION_RADIUS,
            post_collision: PostCollision::Rest,
            seed: None,
        }
    }
}

impl TransportConfig {
    /// Config with the five primary parameters and defaults for the rest.
    pub fn new(
        width: f64,
        height: f64,
        ion_spacing: f64,
        initial_speed: f64,
        electron_count: usize,
    ) -> Self {
        Self {
            width,
            height,
            ion_spacing,
            initial_speed,
            electron_count,
            ..Self::default()
        }
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style collision policy override.
    pub fn with_post_collision(mut self, policy: PostCollision) -> Self {
        self.post_collision = policy;
        self
    }

    /// Parse a config from TOML. Apart from the sign of `electron_count` the
    /// result is not validated; see [`validate`](Self::validate).
    ///
    /// Errors:
    /// - `Error::Config` on malformed TOML, unknown keys or mistyped values.
    /// - `Error::InvalidParameter` if `electron_count` is negative.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let table: toml::Table = s.parse()?;
        if let Some(n) = table.get("electron_count").and_then(toml::Value::as_integer) {
            if n < 0 {
                return Err(Error::InvalidParameter(format!(
                    "electron_count must be >= 0, got {n}"
                )));
            }
        }
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Check every parameter without building an engine.
    ///
    /// Errors: `Error::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(Error::InvalidParameter(
                "initial_speed must be finite and >= 0".into(),
            ));
        }
        // Lattice validation covers area, spacing and margin.
        lattice::generate_with_margin(self.width, self.height, self.ion_spacing, self.ion_radius)
            .map(|_| ())
    }
}
