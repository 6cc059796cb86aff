//! Session export - JSON snapshots of parameters and tick history.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::{FieldEngine, TickReport};
use crate::error::FieldResult;
use crate::tensor::AXES;

/// Tuning parameters recorded alongside exported history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionParameters {
    pub resolution: usize,
    pub axes: usize,
    pub baseline_frequencies: [f64; 3],
    pub evolution_rate: f64,
    pub time_compression: f64,
    pub instability_threshold: f64,
}

impl From<&EngineConfig> for SessionParameters {
    fn from(config: &EngineConfig) -> Self {
        Self {
            resolution: config.resolution,
            axes: AXES,
            baseline_frequencies: config.baseline_frequencies,
            evolution_rate: config.evolution_rate,
            time_compression: config.time_compression,
            instability_threshold: config.instability_threshold,
        }
    }
}

/// Complete session snapshot: parameters plus retained tick reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    pub parameters: SessionParameters,

    /// Total ticks run this session; may exceed the retained history.
    pub ticks: u64,

    pub history: Vec<TickReport>,
}

impl FieldEngine {
    /// Snapshot the session for export.
    pub fn export(&self) -> SessionExport {
        SessionExport {
            parameters: SessionParameters::from(self.config()),
            ticks: self.tick_count(),
            history: self.history().iter().cloned().collect(),
        }
    }

    /// Render the session snapshot as pretty-printed JSON.
    pub fn export_json(&self) -> FieldResult<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::ExternalReading;

    #[test]
    fn test_export_snapshots_parameters_and_history() {
        let mut engine = FieldEngine::new(EngineConfig::new(3)).unwrap();
        let reading = ExternalReading {
            field_strength: 0.82,
            drift_velocity: 0.42,
        };
        engine.tick(Some(&reading)).unwrap();
        engine.tick(Some(&reading)).unwrap();

        let export = engine.export();
        assert_eq!(export.parameters.resolution, 3);
        assert_eq!(export.parameters.axes, AXES);
        assert_eq!(export.ticks, 2);
        assert_eq!(export.history.len(), 2);
        assert!(export.history[1].correction_active);
    }

    #[test]
    fn test_export_json_roundtrip() {
        let mut engine = FieldEngine::new(EngineConfig::new(3)).unwrap();
        let reading = ExternalReading {
            field_strength: 0.9,
            drift_velocity: 0.1,
        };
        engine.tick(Some(&reading)).unwrap();

        let json = engine.export_json().unwrap();
        let parsed: SessionExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, engine.export());
        assert_eq!(parsed.history[0].tick, 1);
        assert!(!parsed.history[0].correction_active);
    }
}
