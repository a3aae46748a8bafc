use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::geometry::TimeShiftMatrix;

/// Builds `A(f) = exp(i·2π·f·T)` element-wise from the shared shift matrix.
pub struct FrequencyOperator;

impl FrequencyOperator {
    pub fn at(shifts: &TimeShiftMatrix, frequency: f64) -> Array2<Complex64> {
        let omega = 2.0 * PI * frequency;
        shifts
            .view()
            .mapv(|shift| Complex64::from_polar(1.0, omega * shift))
    }
}
