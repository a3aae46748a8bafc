use crate::geometry::axis::{validate_coordinates, TimeAxis};
use crate::geometry::timeshift::TimeShiftMatrix;
use crate::prelude::{PathModel, RadonResult};

/// Acquisition and Radon-domain axes shared by the forward and inverse engines.
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    time: TimeAxis,
    distances: Vec<f64>,
    slowness: Vec<f64>,
    reference_distance: f64,
    path: PathModel,
}

impl Survey {
    pub fn new(
        time_axis: &[f64],
        distances: &[f64],
        slowness: &[f64],
        reference_distance: f64,
        path: PathModel,
    ) -> RadonResult<Self> {
        let time = TimeAxis::new(time_axis)?;
        validate_coordinates("distance", distances)?;
        validate_coordinates("slowness", slowness)?;
        Ok(Self {
            time,
            distances: distances.to_vec(),
            slowness: slowness.to_vec(),
            reference_distance,
            path,
        })
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn slowness(&self) -> &[f64] {
        &self.slowness
    }

    pub fn reference_distance(&self) -> f64 {
        self.reference_distance
    }

    pub fn path(&self) -> PathModel {
        self.path
    }

    /// `(Nd, Nt)` shape expected of a data panel.
    pub fn data_shape(&self) -> (usize, usize) {
        (self.distances.len(), self.time.len())
    }

    /// `(Np, Nt)` shape expected of a Radon panel.
    pub fn radon_shape(&self) -> (usize, usize) {
        (self.slowness.len(), self.time.len())
    }

    pub fn time_shifts(&self) -> RadonResult<TimeShiftMatrix> {
        TimeShiftMatrix::build(
            &self.distances,
            &self.slowness,
            self.reference_distance,
            self.path,
        )
    }
}
