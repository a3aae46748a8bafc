use ndarray::{Array2, ArrayView2};

use crate::geometry::axis::validate_coordinates;
use crate::prelude::{PathModel, RadonError, RadonResult};

/// Geometry-only shifts `[distance × slowness]` relating slowness to offset.
///
/// Built once per engine and shared read-only by every frequency bin.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeShiftMatrix {
    shifts: Array2<f64>,
}

impl TimeShiftMatrix {
    pub fn build(
        distances: &[f64],
        slowness: &[f64],
        reference_distance: f64,
        path: PathModel,
    ) -> RadonResult<Self> {
        validate_coordinates("distance", distances)?;
        validate_coordinates("slowness", slowness)?;
        if !reference_distance.is_finite() {
            return Err(RadonError::InvalidAxis(format!(
                "reference distance must be finite, got {}",
                reference_distance
            )));
        }

        let shifts = Array2::from_shape_fn((distances.len(), slowness.len()), |(j, k)| {
            let offset = distances[j] - reference_distance;
            let p = slowness[k];
            match path {
                PathModel::Linear => p * offset,
                PathModel::Parabolic => {
                    2.0 * reference_distance * p * offset + p * offset * offset
                }
            }
        });

        Ok(Self { shifts })
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.shifts.view()
    }

    pub fn distance_count(&self) -> usize {
        self.shifts.nrows()
    }

    pub fn slowness_count(&self) -> usize {
        self.shifts.ncols()
    }
}
