//! TOML configuration for a probe pulse and the time grid it is sampled on.
//!
//! ```toml
//! [pulse]
//! op_max = 10.0
//! tau = 1.0
//!
//! [sampling]   # optional
//! t_start = 0.0
//! t_stop = 1.0 # defaults to `|pulse.tau|`
//! points = 501 # defaults to 1000
//! ```

use std::{ fs, path::Path };
use ndarray as nd;
use serde::Deserialize;
use tracing::debug;
use crate::{
    envelope::RaisedCosine,
    error::{ PulseError, PulseResult },
};

/// Default number of points in the sampling grid.
pub const DEFAULT_POINTS: usize = 1000;

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseConfig {
    pub pulse: PulseSection,
    #[serde(default)]
    pub sampling: SamplingSection,
}

/// Pulse shape parameters.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseSection {
    /// Peak Rabi frequency.
    pub op_max: f64,
    /// Pulse duration.
    pub tau: f64,
}

/// Time grid parameters.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingSection {
    pub t_start: f64,
    /// End of the grid; the magnitude of the pulse duration if left unset.
    pub t_stop: Option<f64>,
    pub points: usize,
}

impl Default for SamplingSection {
    fn default() -> Self {
        Self { t_start: 0.0, t_stop: None, points: DEFAULT_POINTS }
    }
}

impl PulseConfig {
    /// Build a config sampling a single full period of the pulse, then
    /// validate it.
    pub fn new(op_max: f64, tau: f64, points: usize) -> PulseResult<Self> {
        let config = Self {
            pulse: PulseSection { op_max, tau },
            sampling: SamplingSection { points, ..SamplingSection::default() },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(s: &str) -> PulseResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config from a TOML file.
    pub fn from_toml_file<P>(path: P) -> PulseResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading pulse config");
        let raw = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        debug!(?config, "loaded pulse config");
        Ok(config)
    }

    /// End of the sampling grid.
    ///
    /// Unless set explicitly, this is `|tau|`, so that a pulse with negative
    /// duration is still sampled over one period forward in time.
    pub fn t_stop(&self) -> f64 {
        self.sampling.t_stop.unwrap_or(self.pulse.tau.abs())
    }

    /// Check pulse parameters and the sampling grid.
    pub fn validate(&self) -> PulseResult<()> {
        self.pulse()?;
        let SamplingSection { t_start, points, .. } = self.sampling;
        let t_stop = self.t_stop();
        if points < 2 {
            return Err(PulseError::Config(
                format!("sampling.points must be at least 2, got {}", points)
            ));
        }
        if !t_start.is_finite() || !t_stop.is_finite() {
            return Err(PulseError::Config(
                format!(
                    "sampling bounds must be finite, got [{}, {}]",
                    t_start, t_stop,
                )
            ));
        }
        if t_stop <= t_start {
            return Err(PulseError::Config(
                format!(
                    "sampling.t_stop ({}) must be greater than sampling.t_start ({})",
                    t_stop, t_start,
                )
            ));
        }
        Ok(())
    }

    /// Construct the configured pulse.
    pub fn pulse(&self) -> PulseResult<RaisedCosine> {
        RaisedCosine::new(self.pulse.op_max, self.pulse.tau)
    }

    /// Construct the evenly spaced sampling grid, endpoints included.
    pub fn time_grid(&self) -> nd::Array1<f64> {
        nd::Array1::linspace(self.sampling.t_start, self.t_stop(), self.sampling.points)
    }
}
