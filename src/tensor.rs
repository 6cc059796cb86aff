//! Field tensor - dense 11-axis lattice storage
//!
//! The atomic storage unit of the engine. Cells live in a single flat
//! `Vec<f64>` addressed row-major, so axis 10 is the fastest-varying
//! dimension. The buffer is allocated once and never resized.

use std::fmt;

use crate::error::{FieldError, FieldResult};

/// Number of axes in every field tensor.
pub const AXES: usize = 11;

/// Dense lattice of `resolution^11` cells.
///
/// All access is bounds-checked per axis. Out-of-range coordinates return
/// [`FieldError::IndexOutOfRange`] naming the offending axis; nothing
/// clamps, wraps, or panics.
#[derive(Clone)]
pub struct FieldTensor {
    values: Vec<f64>,
    resolution: usize,
}

impl FieldTensor {
    /// Create a lattice of zeros with the center cell marked at 1.0.
    pub fn new(resolution: usize) -> FieldResult<Self> {
        if resolution < 2 {
            return Err(FieldError::InvalidConfiguration {
                reason: "resolution must be at least 2",
            });
        }
        let len = resolution
            .checked_pow(AXES as u32)
            .ok_or(FieldError::InvalidConfiguration {
                reason: "resolution too large to address",
            })?;

        let mut tensor = Self {
            values: vec![0.0; len],
            resolution,
        };
        let center = tensor.center();
        tensor.set(&center, 1.0)?;
        Ok(tensor)
    }

    /// Cells per axis.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Total cell count, `resolution^11`.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The center coordinate, `resolution / 2` on every axis.
    pub fn center(&self) -> [usize; AXES] {
        [self.resolution / 2; AXES]
    }

    /// Row-major flat offset of a coordinate tuple.
    fn offset(&self, index: &[usize; AXES]) -> FieldResult<usize> {
        let mut offset = 0;
        for (axis, &i) in index.iter().enumerate() {
            if i >= self.resolution {
                return Err(FieldError::IndexOutOfRange {
                    axis,
                    index: i,
                    resolution: self.resolution,
                });
            }
            offset = offset * self.resolution + i;
        }
        Ok(offset)
    }

    /// Read one cell.
    pub fn get(&self, index: &[usize; AXES]) -> FieldResult<f64> {
        Ok(self.values[self.offset(index)?])
    }

    /// Write one cell.
    pub fn set(&mut self, index: &[usize; AXES], value: f64) -> FieldResult<()> {
        let offset = self.offset(index)?;
        self.values[offset] = value;
        Ok(())
    }

    /// Raw cell buffer, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Extract the 2D plane through the center spanned by two axes.
    ///
    /// Rows vary `axis_a`, columns vary `axis_b`; every other axis stays
    /// pinned at the center coordinate. The plane is `resolution` rows of
    /// `resolution` columns.
    pub fn slice(&self, axis_a: usize, axis_b: usize) -> FieldResult<Vec<Vec<f64>>> {
        if axis_a >= AXES {
            return Err(FieldError::AxisOutOfRange { axis: axis_a });
        }
        if axis_b >= AXES {
            return Err(FieldError::AxisOutOfRange { axis: axis_b });
        }
        if axis_a == axis_b {
            return Err(FieldError::DegenerateSlice { axis: axis_a });
        }

        let mut index = self.center();
        let mut plane = Vec::with_capacity(self.resolution);
        for a in 0..self.resolution {
            index[axis_a] = a;
            let mut row = Vec::with_capacity(self.resolution);
            for b in 0..self.resolution {
                index[axis_b] = b;
                row.push(self.get(&index)?);
            }
            plane.push(row);
        }
        Ok(plane)
    }
}

impl fmt::Debug for FieldTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTensor")
            .field("resolution", &self.resolution)
            .field("cells", &self.values.len())
            .finish()
    }
}
