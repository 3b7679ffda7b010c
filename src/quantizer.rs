//! State-space discretization onto a fixed grid of pin values.
//!
//! Each continuous dimension is covered by evenly spaced "pins" spanning its
//! configured bounds. Quantization snaps a state component to the pin at or
//! below it (right-open buckets), clamping out-of-range values to the
//! extreme buckets instead of failing.

use std::fmt;

use crate::{
    cell::CellId,
    config::GridSpec,
    error::{Error, Result},
};

/// One quantized state: the snapped pin value and bucket index per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedState {
    pub values: Vec<f64>,
    pub indices: Vec<usize>,
}

impl QuantizedState {
    pub fn cell_id(&self) -> CellId {
        CellId::new(self.indices.clone())
    }
}

/// Pure mapping from continuous state vectors to grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct StateQuantizer {
    pins: Vec<Vec<f64>>,
}

impl StateQuantizer {
    pub fn new(spec: &GridSpec) -> Self {
        let pins = spec
            .bounds()
            .iter()
            .zip(spec.levels())
            .map(|(bounds, &levels)| linspace(bounds.min, bounds.max, levels))
            .collect();
        Self { pins }
    }

    pub fn dimensions(&self) -> usize {
        self.pins.len()
    }

    /// Pin values covering one dimension, in ascending order.
    pub fn pins(&self, dimension: usize) -> &[f64] {
        &self.pins[dimension]
    }

    /// Snap a state vector to the grid.
    ///
    /// Out-of-range components clamp silently to the extreme bucket; a
    /// quantized index is always in `[0, levels - 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `state` does not have one
    /// component per grid dimension.
    pub fn quantize(&self, state: &[f64]) -> Result<QuantizedState> {
        if state.len() != self.pins.len() {
            return Err(Error::DimensionMismatch {
                expected: self.pins.len(),
                got: state.len(),
            });
        }

        let mut values = Vec::with_capacity(state.len());
        let mut indices = Vec::with_capacity(state.len());
        for (&component, pins) in state.iter().zip(&self.pins) {
            let index = bucket_index(component, pins);
            values.push(pins[index]);
            indices.push(index);
        }

        Ok(QuantizedState { values, indices })
    }
}

impl fmt::Display for StateQuantizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (dimension, pins) in self.pins.iter().enumerate() {
            if dimension > 0 {
                writeln!(f)?;
            }
            write!(f, "dimension {dimension} has {} pins: {pins:?}", pins.len())?;
        }
        Ok(())
    }
}

/// `count` evenly spaced values spanning `[min, max]`, both ends included.
fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + step * i as f64).collect()
}

/// Index of the last pin at or below `value`, clamped to the grid.
fn bucket_index(value: f64, pins: &[f64]) -> usize {
    let at_or_below = pins.partition_point(|pin| *pin <= value);
    at_or_below.saturating_sub(1)
}
