//! Engine configuration and tuning constants.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// Baseline oscillator frequencies, cycled across axes as `axis % 3`.
pub const BASELINE_FREQUENCIES: [f64; 3] = [98.7, 99.1, 98.9];

/// Default lattice resolution (cells per axis).
pub const DEFAULT_RESOLUTION: usize = 5;

/// Default frequency scaling per unit of instability.
pub const DEFAULT_EVOLUTION_RATE: f64 = 0.042;

/// Default temporal blend divisor for corrective writes.
pub const DEFAULT_TIME_COMPRESSION: f64 = 60.0625;

/// Default instability ratio above which correction engages.
pub const DEFAULT_INSTABILITY_THRESHOLD: f64 = 0.5;

/// Configuration for a harmonic field engine.
///
/// All tuning is fixed for the lifetime of a session; the engine never
/// mutates its configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cells per axis. The lattice holds `resolution^11` cells.
    pub resolution: usize,

    /// Oscillator frequency table, indexed by `axis % 3`.
    pub baseline_frequencies: [f64; 3],

    /// Frequency scaling applied per unit of instability during correction.
    pub evolution_rate: f64,

    /// Blend divisor for corrective writes. Values above 1.0 make each
    /// correction a partial step toward the wave target, never a replacement.
    pub time_compression: f64,

    /// Instability ratio above which the field is considered unstable.
    pub instability_threshold: f64,
}

impl EngineConfig {
    /// Create a configuration with the given resolution and default tuning.
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Replace the baseline frequency table.
    pub fn with_frequencies(mut self, frequencies: [f64; 3]) -> Self {
        self.baseline_frequencies = frequencies;
        self
    }

    /// Replace the evolution rate.
    pub fn with_evolution_rate(mut self, rate: f64) -> Self {
        self.evolution_rate = rate;
        self
    }

    /// Replace the time compression divisor.
    pub fn with_time_compression(mut self, time_compression: f64) -> Self {
        self.time_compression = time_compression;
        self
    }

    /// Replace the instability threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.instability_threshold = threshold;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> FieldResult<()> {
        if self.resolution < 2 {
            return Err(FieldError::InvalidConfiguration {
                reason: "resolution must be at least 2",
            });
        }
        if !self.baseline_frequencies.iter().all(|f| f.is_finite()) {
            return Err(FieldError::InvalidConfiguration {
                reason: "baseline frequencies must be finite",
            });
        }
        if !self.evolution_rate.is_finite() {
            return Err(FieldError::InvalidConfiguration {
                reason: "evolution rate must be finite",
            });
        }
        if !self.time_compression.is_finite() || self.time_compression <= 1.0 {
            return Err(FieldError::InvalidConfiguration {
                reason: "time compression must exceed 1.0",
            });
        }
        if !self.instability_threshold.is_finite() || self.instability_threshold <= 0.0 {
            return Err(FieldError::InvalidConfiguration {
                reason: "instability threshold must be positive and finite",
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            baseline_frequencies: BASELINE_FREQUENCIES,
            evolution_rate: DEFAULT_EVOLUTION_RATE,
            time_compression: DEFAULT_TIME_COMPRESSION,
            instability_threshold: DEFAULT_INSTABILITY_THRESHOLD,
        }
    }
}
