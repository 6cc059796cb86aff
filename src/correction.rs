//! Instability-triggered corrective blending.
//!
//! Correction retunes the oscillator table by the instability level, then
//! blends every axis-aligned center line toward the retuned wave. Blended
//! values are computed against the pre-correction lattice and committed in
//! a second pass, so a correction either fully applies or leaves the
//! lattice untouched.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::FieldResult;
use crate::harmonic::{wave, AxisSweep, CORRECTION_PHASE};
use crate::metrics::Stability;
use crate::tensor::{FieldTensor, AXES};

/// Result of an applied correction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionOutcome {
    /// Retuned frequency table the corrective waves were sampled from.
    pub frequencies: [f64; 3],

    /// Normalized overshoot above the threshold,
    /// `(instability - threshold) / threshold`.
    pub strength: f64,
}

/// Scale the baseline table by the instability level.
pub fn correction_frequencies(
    baseline: &[f64; 3],
    evolution_rate: f64,
    instability: f64,
) -> [f64; 3] {
    let factor = 1.0 + evolution_rate * instability;
    [
        baseline[0] * factor,
        baseline[1] * factor,
        baseline[2] * factor,
    ]
}

/// Apply a corrective blend when instability exceeds the threshold.
///
/// Returns `Ok(None)` without touching the lattice when the field is
/// stable. Otherwise every cell on an axis-aligned center line takes a
/// `1 / tc` step toward the retuned wave, where `tc` is the configured
/// time compression. The shared center cell is swept once per axis and the
/// last axis wins, matching seeding order.
pub fn apply_correction(
    tensor: &mut FieldTensor,
    instability: f64,
    config: &EngineConfig,
) -> FieldResult<Option<CorrectionOutcome>> {
    let threshold = config.instability_threshold;
    if !Stability::classify(instability, threshold).is_unstable() {
        return Ok(None);
    }

    let frequencies = correction_frequencies(
        &config.baseline_frequencies,
        config.evolution_rate,
        instability,
    );
    let tc = config.time_compression;

    // Compute pass: read-only against the current lattice.
    let mut staged: Vec<([usize; AXES], f64)> = Vec::with_capacity(AXES * tensor.resolution());
    for (axis, position, index) in AxisSweep::new(tensor) {
        let old = tensor.get(&index)?;
        let target = wave(position as f64, frequencies[axis % 3], CORRECTION_PHASE);
        staged.push((index, (old * (tc - 1.0) + target) / tc));
    }

    // Commit pass: coordinates were validated by the reads above.
    for (index, value) in staged {
        tensor.set(&index, value)?;
    }

    Ok(Some(CorrectionOutcome {
        frequencies,
        strength: (instability - threshold) / threshold,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BASELINE_FREQUENCIES;
    use crate::harmonic::seed_baseline;
    use approx::assert_relative_eq;

    fn seeded(resolution: usize) -> FieldTensor {
        let mut tensor = FieldTensor::new(resolution).unwrap();
        seed_baseline(&mut tensor, &BASELINE_FREQUENCIES).unwrap();
        tensor
    }

    #[test]
    fn test_frequency_scaling() {
        let scaled = correction_frequencies(&BASELINE_FREQUENCIES, 0.042, 0.6);
        assert_relative_eq!(scaled[0], 101.18724, epsilon = 1e-6);
        assert_relative_eq!(scaled[1], 101.59732, epsilon = 1e-6);
        assert_relative_eq!(scaled[2], 101.39228, epsilon = 1e-6);
    }

    #[test]
    fn test_stable_field_is_left_byte_identical() {
        let mut tensor = seeded(3);
        let config = EngineConfig::new(3);
        let before = tensor.values().to_vec();

        // At and below the threshold nothing happens.
        assert!(apply_correction(&mut tensor, 0.5, &config)
            .unwrap()
            .is_none());
        assert!(apply_correction(&mut tensor, 0.3, &config)
            .unwrap()
            .is_none());
        assert_eq!(tensor.values(), &before[..]);
    }

    #[test]
    fn test_correction_blends_toward_wave_targets() {
        let mut tensor = seeded(3);
        let config = EngineConfig::new(3);
        let before = tensor.clone();
        let instability = 0.6;

        let outcome = apply_correction(&mut tensor, instability, &config)
            .unwrap()
            .unwrap();
        assert_relative_eq!(outcome.strength, 0.2, epsilon = 1e-12);

        let center = tensor.center();
        for (axis, position, index) in AxisSweep::new(&before) {
            if index == center {
                continue; // handled below, all axes alias this cell
            }
            let old = before.get(&index).unwrap();
            let new = tensor.get(&index).unwrap();
            let target = wave(
                position as f64,
                outcome.frequencies[axis % 3],
                CORRECTION_PHASE,
            );
            assert!(
                new >= old.min(target) && new <= old.max(target),
                "blend out of range on axis {axis} position {position}"
            );
            assert_ne!(new, old, "swept cell must move toward its target");
        }

        // The center takes a single step toward the axis-10 target.
        let tc = config.time_compression;
        let old_center = before.get(&center).unwrap();
        let center_target = wave(
            center[10] as f64,
            outcome.frequencies[10 % 3],
            CORRECTION_PHASE,
        );
        assert_relative_eq!(
            tensor.get(&center).unwrap(),
            (old_center * (tc - 1.0) + center_target) / tc,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_correction_leaves_off_line_cells_alone() {
        let mut tensor = seeded(3);
        let config = EngineConfig::new(3);

        let mut off_line = tensor.center();
        off_line[1] = 0;
        off_line[6] = 2;
        let corner = [0; AXES];

        apply_correction(&mut tensor, 0.9, &config).unwrap().unwrap();
        assert_eq!(tensor.get(&off_line).unwrap(), 0.0);
        assert_eq!(tensor.get(&corner).unwrap(), 0.0);
    }
}
