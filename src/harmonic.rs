//! Harmonic pattern generation and baseline seeding.
//!
//! Every structured value in the lattice comes from one generator:
//! `0.5 * sin(position * frequency / 10 + phase) + 0.5`, bounded to [0, 1].
//! Seeding writes it at zero phase; correction re-samples it at a quarter-pi
//! phase with retuned frequencies.

use std::f64::consts::FRAC_PI_4;

use crate::error::FieldResult;
use crate::tensor::{FieldTensor, AXES};

/// Phase offset used by corrective writes.
pub const CORRECTION_PHASE: f64 = FRAC_PI_4;

/// Sample the harmonic generator at an axis position.
///
/// Output is always within `[0.0, 1.0]`.
#[inline]
pub fn wave(position: f64, frequency: f64, phase_offset: f64) -> f64 {
    0.5 * (position * frequency / 10.0 + phase_offset).sin() + 0.5
}

/// Iterator over every cell on an axis-aligned line through the center.
///
/// Yields `(axis, position, index)` with axes ascending 0..=10 and positions
/// ascending within each axis. The center cell appears once per axis, so
/// writers following this order resolve center aliasing in favor of the
/// last axis.
pub(crate) struct AxisSweep {
    center: [usize; AXES],
    resolution: usize,
    axis: usize,
    position: usize,
}

impl AxisSweep {
    pub(crate) fn new(tensor: &FieldTensor) -> Self {
        Self {
            center: tensor.center(),
            resolution: tensor.resolution(),
            axis: 0,
            position: 0,
        }
    }
}

impl Iterator for AxisSweep {
    type Item = (usize, usize, [usize; AXES]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.axis >= AXES {
            return None;
        }
        let axis = self.axis;
        let position = self.position;
        let mut index = self.center;
        index[axis] = position;

        self.position += 1;
        if self.position >= self.resolution {
            self.position = 0;
            self.axis += 1;
        }

        Some((axis, position, index))
    }
}

/// Seed baseline harmonic patterns along every axis-aligned center line.
///
/// Axis `i` is written with `frequencies[i % 3]` at zero phase. Later axes
/// overwrite the shared center cell, so after seeding the center holds the
/// axis-10 value and the 1.0 creation marker is gone.
pub fn seed_baseline(tensor: &mut FieldTensor, frequencies: &[f64; 3]) -> FieldResult<()> {
    for (axis, position, index) in AxisSweep::new(tensor) {
        let value = wave(position as f64, frequencies[axis % 3], 0.0);
        tensor.set(&index, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BASELINE_FREQUENCIES;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_wave_stays_in_unit_interval() {
        for p in 0..50 {
            for f in [0.0, 1.0, 98.7, 99.1, 98.9, 500.0] {
                let v = wave(p as f64, f, CORRECTION_PHASE);
                assert!((0.0..=1.0).contains(&v), "wave({p}, {f}) = {v}");
            }
        }
    }

    #[test]
    fn test_wave_phase_and_origin() {
        // Zero argument sits at the midpoint; a quarter turn hits the peak.
        assert_relative_eq!(wave(0.0, 98.7, 0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(wave(0.0, 98.7, FRAC_PI_2), 1.0, epsilon = 1e-12);

        let argument: f64 = 2.0 * 99.1 / 10.0;
        assert_relative_eq!(
            wave(2.0, 99.1, 0.0),
            0.5 * argument.sin() + 0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_sweep_order_and_shape() {
        let tensor = FieldTensor::new(3).unwrap();
        let items: Vec<_> = AxisSweep::new(&tensor).collect();
        assert_eq!(items.len(), AXES * 3);

        let mut last_axis = 0;
        for (axis, position, index) in items {
            assert!(axis >= last_axis, "axes must ascend");
            last_axis = axis;
            assert_eq!(index[axis], position);
            for (other, &i) in index.iter().enumerate() {
                if other != axis {
                    assert_eq!(i, 1, "off-sweep axes stay at center");
                }
            }
        }
    }

    #[test]
    fn test_seed_writes_expected_lines() {
        let mut tensor = FieldTensor::new(3).unwrap();
        seed_baseline(&mut tensor, &BASELINE_FREQUENCIES).unwrap();

        // Off-center cells carry their own axis frequency.
        let mut index = tensor.center();
        index[0] = 2;
        assert_relative_eq!(
            tensor.get(&index).unwrap(),
            wave(2.0, BASELINE_FREQUENCIES[0], 0.0),
            epsilon = 1e-12
        );
        let mut index = tensor.center();
        index[5] = 0;
        assert_relative_eq!(
            tensor.get(&index).unwrap(),
            wave(0.0, BASELINE_FREQUENCIES[5 % 3], 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_seed_center_holds_last_axis_value() {
        let mut tensor = FieldTensor::new(3).unwrap();
        seed_baseline(&mut tensor, &BASELINE_FREQUENCIES).unwrap();

        // Axis 10 writes the shared center last, 10 % 3 = 1.
        assert_relative_eq!(
            tensor.get(&tensor.center()).unwrap(),
            wave(1.0, BASELINE_FREQUENCIES[1], 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_seed_leaves_off_line_cells_zero() {
        let mut tensor = FieldTensor::new(3).unwrap();
        seed_baseline(&mut tensor, &BASELINE_FREQUENCIES).unwrap();

        // Two axes displaced at once is off every sweep line.
        let mut index = tensor.center();
        index[0] = 0;
        index[1] = 0;
        assert_eq!(tensor.get(&index).unwrap(), 0.0);
    }
}
