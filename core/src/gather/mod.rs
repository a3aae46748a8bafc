//! Preparation of recorded traces into the panels the transform consumes.

pub mod axis;
pub mod stack;

use ndarray::{Array2, Axis};

use crate::prelude::{RadonError, RadonResult};

pub use axis::{linspace, nearest_index, uniform_time_axis};
pub use stack::{partial_stack, PartialStack};

/// Traces ordered by distance together with their axes and per-trace weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Gather {
    pub time_axis: Vec<f64>,
    pub distances: Vec<f64>,
    pub data: Array2<f64>,
    pub weights: Vec<f64>,
}

impl Gather {
    /// Builds a gather with unit weights.
    pub fn new(time_axis: Vec<f64>, distances: Vec<f64>, data: Array2<f64>) -> RadonResult<Self> {
        let weights = vec![1.0; distances.len()];
        Self::with_weights(time_axis, distances, data, weights)
    }

    pub fn with_weights(
        time_axis: Vec<f64>,
        distances: Vec<f64>,
        data: Array2<f64>,
        weights: Vec<f64>,
    ) -> RadonResult<Self> {
        let expected = (distances.len(), time_axis.len());
        if data.dim() != expected {
            return Err(RadonError::ShapeMismatch(format!(
                "gather data is {:?}, expected {:?}",
                data.dim(),
                expected
            )));
        }
        if weights.len() != distances.len() {
            return Err(RadonError::ShapeMismatch(format!(
                "{} weights for {} traces",
                weights.len(),
                distances.len()
            )));
        }
        Ok(Self {
            time_axis,
            distances,
            data,
            weights,
        })
    }

    pub fn trace_count(&self) -> usize {
        self.distances.len()
    }

    /// Scales every trace by its peak absolute amplitude; silent traces are left as is.
    pub fn normalize_traces(&mut self) {
        for mut trace in self.data.axis_iter_mut(Axis(0)) {
            let peak = trace.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            if peak > 0.0 {
                trace.mapv_inplace(|v| v / peak);
            }
        }
    }

    /// Replaces the traces with a partial stack over `bins` uniform distance edges.
    ///
    /// Stack trace counts become the new weights, so empty stacks carry no weight.
    pub fn stacked(&self, bins: usize, root_order: Option<f64>) -> RadonResult<Gather> {
        let stack = partial_stack(self.data.view(), &self.distances, bins, root_order)?;
        let weights = stack.counts.iter().map(|&count| count as f64).collect();
        Gather::with_weights(self.time_axis.clone(), stack.centers, stack.data, weights)
    }
}
