//! Scalar stability metrics probed from fixed lattice cells.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};
use crate::telemetry::ExternalReading;
use crate::tensor::FieldTensor;

/// Axis probed one step below center for entropy.
pub const ENTROPY_AXIS: usize = 7;

/// Axis probed one step above center for drift velocity.
pub const DRIFT_AXIS: usize = 8;

/// Axis probed one step below center for phi alignment.
pub const ALIGNMENT_AXIS: usize = 9;

/// The four scalar metrics extracted each tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMetrics {
    pub field_strength: f64,
    pub drift_velocity: f64,
    pub entropy: f64,
    pub phi_alignment: f64,
}

/// Stability verdict for a single tick.
///
/// Classification is pure: no hysteresis, no memory of previous ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    Stable,
    Unstable,
}

impl Stability {
    /// Classify an instability ratio against a threshold (strict compare).
    pub fn classify(instability: f64, threshold: f64) -> Self {
        if instability > threshold {
            Stability::Unstable
        } else {
            Stability::Stable
        }
    }

    pub fn is_unstable(self) -> bool {
        self == Stability::Unstable
    }
}

/// Probe the lattice for the four stability metrics.
///
/// Strength reads the center cell; drift, entropy, and alignment each read
/// one step along their probe axis. An external reading, when supplied,
/// overrides strength and drift only; entropy and alignment always come
/// from the lattice. Probes are bounds-checked, so a lattice too small for
/// the drift step surfaces [`FieldError::IndexOutOfRange`].
pub fn extract_metrics(
    tensor: &FieldTensor,
    external: Option<&ExternalReading>,
) -> FieldResult<FieldMetrics> {
    let center = tensor.center();

    let (field_strength, drift_velocity) = match external {
        Some(reading) => (reading.field_strength, reading.drift_velocity),
        None => {
            let mut drift_index = center;
            drift_index[DRIFT_AXIS] += 1;
            (tensor.get(&center)?, tensor.get(&drift_index)?)
        }
    };

    let mut entropy_index = center;
    entropy_index[ENTROPY_AXIS] -= 1;
    let entropy = tensor.get(&entropy_index)?;

    let mut alignment_index = center;
    alignment_index[ALIGNMENT_AXIS] -= 1;
    let phi_alignment = tensor.get(&alignment_index)?;

    Ok(FieldMetrics {
        field_strength,
        drift_velocity,
        entropy,
        phi_alignment,
    })
}

/// Drift-to-strength ratio. Zero strength is an error, not infinity.
pub fn instability_ratio(field_strength: f64, drift_velocity: f64) -> FieldResult<f64> {
    if field_strength == 0.0 {
        return Err(FieldError::DivisionByZero);
    }
    Ok(drift_velocity / field_strength)
}
