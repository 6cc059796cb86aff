//! Field engine - the per-tick stability pipeline
//!
//! Each tick probes four scalar metrics from fixed lattice cells, evaluates
//! the drift-to-strength ratio, and commits a corrective blend when the
//! ratio exceeds the configured threshold. Reports land in a bounded
//! history and fan out to subscribed observers.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::correction::apply_correction;
use crate::error::{FieldError, FieldResult};
use crate::harmonic::seed_baseline;
use crate::metrics::{extract_metrics, instability_ratio, FieldMetrics};
use crate::observer::{FieldEvent, FieldObserver};
use crate::telemetry::ExternalReading;
use crate::tensor::FieldTensor;

/// Maximum number of tick reports retained in history.
pub const HISTORY_CAPACITY: usize = 1000;

/// Snapshot of one completed tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// 1-based tick ordinal.
    pub tick: u64,

    /// Drift-to-strength ratio this tick was classified on.
    pub instability: f64,

    pub field_strength: f64,
    pub drift_velocity: f64,
    pub entropy: f64,
    pub phi_alignment: f64,

    /// Whether a corrective blend committed this tick.
    pub correction_active: bool,

    /// Retuned frequency table, present when correction ran.
    pub correction_frequencies: Option<[f64; 3]>,

    /// Normalized overshoot above the threshold, present when correction ran.
    pub correction_strength: Option<f64>,
}

/// The harmonic field engine.
///
/// Owns the lattice and drives the tick pipeline. Strictly synchronous:
/// observers run inline on the ticking thread, and the only state carried
/// between ticks is the lattice itself.
#[derive(Clone)]
pub struct FieldEngine {
    /// Dense 11-axis lattice.
    tensor: FieldTensor,

    /// Tuning parameters, fixed for the session.
    config: EngineConfig,

    /// Total successful ticks.
    tick_count: u64,

    /// Whether the most recent tick committed a correction.
    correction_active: bool,

    /// Frequency table from the most recent correction.
    last_frequencies: Option<[f64; 3]>,

    /// Bounded report history, oldest first.
    history: VecDeque<TickReport>,

    /// Subscribed observers.
    observers: Vec<Arc<dyn FieldObserver>>,
}

impl FieldEngine {
    /// Create an engine: validate the config, allocate the lattice, seed
    /// baseline harmonic patterns.
    pub fn new(config: EngineConfig) -> FieldResult<Self> {
        config.validate()?;
        let mut tensor = FieldTensor::new(config.resolution)?;
        seed_baseline(&mut tensor, &config.baseline_frequencies)?;
        info!(
            resolution = config.resolution,
            cells = tensor.len(),
            evolution_rate = config.evolution_rate,
            time_compression = config.time_compression,
            threshold = config.instability_threshold,
            "field engine initialized"
        );

        Ok(Self {
            tensor,
            config,
            tick_count: 0,
            correction_active: false,
            last_frequencies: None,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            observers: Vec::new(),
        })
    }

    // =========================================================================
    // TIME ADVANCEMENT
    // =========================================================================

    /// Run one tick of the stability pipeline.
    ///
    /// Metrics are probed (an external reading overrides strength and drift
    /// when supplied), the instability ratio is evaluated, and a corrective
    /// blend commits if the ratio exceeds the threshold. On error the
    /// lattice and the tick counter are left unchanged.
    pub fn tick(&mut self, external: Option<&ExternalReading>) -> FieldResult<TickReport> {
        let metrics = extract_metrics(&self.tensor, external)?;
        let instability = instability_ratio(metrics.field_strength, metrics.drift_velocity)?;
        let outcome = apply_correction(&mut self.tensor, instability, &self.config)?;

        self.tick_count += 1;
        self.correction_active = outcome.is_some();
        match &outcome {
            Some(outcome) => {
                self.last_frequencies = Some(outcome.frequencies);
                info!(
                    tick = self.tick_count,
                    instability,
                    strength = outcome.strength,
                    frequencies = ?outcome.frequencies,
                    "correction applied"
                );
            }
            None => debug!(tick = self.tick_count, instability, "field stable"),
        }

        let report = TickReport {
            tick: self.tick_count,
            instability,
            field_strength: metrics.field_strength,
            drift_velocity: metrics.drift_velocity,
            entropy: metrics.entropy,
            phi_alignment: metrics.phi_alignment,
            correction_active: self.correction_active,
            correction_frequencies: outcome.as_ref().map(|o| o.frequencies),
            correction_strength: outcome.as_ref().map(|o| o.strength),
        };
        self.record(report.clone());

        self.notify(FieldEvent::Tick {
            report: report.clone(),
        });
        if let Some(outcome) = outcome {
            self.notify(FieldEvent::CorrectionApplied {
                tick: report.tick,
                instability,
                frequencies: outcome.frequencies,
                strength: outcome.strength,
            });
        }

        Ok(report)
    }

    /// Advance multiple ticks with the same external reading.
    ///
    /// Reports accumulate in history and the last one is returned; stops at
    /// the first error. `n` must be at least 1.
    pub fn tick_n(
        &mut self,
        n: usize,
        external: Option<&ExternalReading>,
    ) -> FieldResult<TickReport> {
        let mut last = None;
        for _ in 0..n {
            last = Some(self.tick(external)?);
        }
        last.ok_or(FieldError::InvalidConfiguration {
            reason: "tick_n needs at least one tick",
        })
    }

    // =========================================================================
    // READING
    // =========================================================================

    /// Probe current metrics without ticking or external overrides.
    pub fn metrics(&self) -> FieldResult<FieldMetrics> {
        extract_metrics(&self.tensor, None)
    }

    /// 2D center plane spanned by two axes, for visualization hosts.
    pub fn slice(&self, axis_a: usize, axis_b: usize) -> FieldResult<Vec<Vec<f64>>> {
        self.tensor.slice(axis_a, axis_b)
    }

    /// The lattice itself.
    pub fn tensor(&self) -> &FieldTensor {
        &self.tensor
    }

    /// Retained reports, oldest first.
    pub fn history(&self) -> &VecDeque<TickReport> {
        &self.history
    }

    /// Most recent report, if any tick has run.
    pub fn latest(&self) -> Option<&TickReport> {
        self.history.back()
    }

    // =========================================================================
    // METADATA
    // =========================================================================

    /// Get configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get current tick count.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the most recent tick committed a correction.
    pub fn correction_active(&self) -> bool {
        self.correction_active
    }

    /// Frequency table from the most recent correction, if any occurred.
    pub fn active_frequencies(&self) -> Option<[f64; 3]> {
        self.last_frequencies
    }

    /// Frequency signal for sonification hosts: the latest correction table
    /// while a correction is active, the baseline otherwise.
    pub fn oscillator_frequencies(&self) -> [f64; 3] {
        if self.correction_active {
            self.last_frequencies
                .unwrap_or(self.config.baseline_frequencies)
        } else {
            self.config.baseline_frequencies
        }
    }

    /// Reset to the freshly seeded state. Configuration and subscribed
    /// observers are kept.
    pub fn reset(&mut self) -> FieldResult<()> {
        self.tensor = FieldTensor::new(self.config.resolution)?;
        seed_baseline(&mut self.tensor, &self.config.baseline_frequencies)?;
        self.tick_count = 0;
        self.correction_active = false;
        self.last_frequencies = None;
        self.history.clear();
        debug!(resolution = self.config.resolution, "field engine reset");
        Ok(())
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    /// Subscribe an observer to tick and correction events.
    pub fn subscribe(&mut self, observer: Arc<dyn FieldObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self, event: FieldEvent) {
        for observer in &self.observers {
            observer.on_event(event.clone());
        }
    }

    fn record(&mut self, report: TickReport) {
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(report);
    }
}

impl fmt::Debug for FieldEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEngine")
            .field("tensor", &self.tensor)
            .field("tick_count", &self.tick_count)
            .field("correction_active", &self.correction_active)
            .field("history_len", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
