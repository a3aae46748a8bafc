use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use num_complex::Complex64;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Weighted Gram matrix `AᴴWA` for diagonal `W = diag(weights)`.
    pub fn weighted_gram(operator: ArrayView2<Complex64>, weights: ArrayView1<f64>) -> Array2<Complex64> {
        let weighted = Self::scale_rows(operator, weights);
        Self::adjoint(operator).dot(&weighted)
    }

    /// Weighted projection `AᴴWd` of a data column.
    pub fn weighted_projection(
        operator: ArrayView2<Complex64>,
        weights: ArrayView1<f64>,
        data: ArrayView1<Complex64>,
    ) -> Array1<Complex64> {
        let weighted: Array1<Complex64> = data
            .iter()
            .zip(weights.iter())
            .map(|(&value, &w)| value * w)
            .collect();
        Self::adjoint(operator).dot(&weighted)
    }

    /// Conjugate transpose.
    pub fn adjoint(matrix: ArrayView2<Complex64>) -> Array2<Complex64> {
        matrix.t().mapv(|value| value.conj())
    }

    pub fn trace(matrix: ArrayView2<Complex64>) -> Complex64 {
        matrix.diag().sum()
    }

    /// Returns `matrix + diag(diagonal)`.
    pub fn add_diagonal(matrix: ArrayView2<Complex64>, diagonal: ArrayView1<f64>) -> Array2<Complex64> {
        let mut damped = matrix.to_owned();
        damped
            .diag_mut()
            .iter_mut()
            .zip(diagonal.iter())
            .for_each(|(entry, &d)| *entry += d);
        damped
    }

    /// Solves a square complex system by LU with partial pivoting.
    ///
    /// Returns `None` when a pivot collapses relative to the largest pivot or the
    /// solution is not finite.
    pub fn solve(system: ArrayView2<Complex64>, rhs: ArrayView1<Complex64>) -> Option<Array1<Complex64>> {
        let n = rhs.len();
        if system.dim() != (n, n) || n == 0 {
            return None;
        }

        let matrix = DMatrix::from_fn(n, n, |i, j| system[[i, j]]);
        let vector = DVector::from_iterator(n, rhs.iter().copied());
        let lu = matrix.lu();

        let pivots: Vec<f64> = lu.u().diagonal().iter().map(|p| p.norm()).collect();
        let largest = pivots.iter().cloned().fold(0.0_f64, f64::max);
        let smallest = pivots.iter().cloned().fold(f64::INFINITY, f64::min);
        if largest == 0.0 || smallest <= largest * n as f64 * f64::EPSILON {
            return None;
        }

        let solution = lu.solve(&vector)?;
        if solution.iter().any(|value| !value.re.is_finite() || !value.im.is_finite()) {
            return None;
        }
        Some(solution.iter().copied().collect())
    }

    fn scale_rows(matrix: ArrayView2<Complex64>, weights: ArrayView1<f64>) -> Array2<Complex64> {
        let mut scaled = matrix.to_owned();
        for (mut row, &w) in scaled.axis_iter_mut(Axis(0)).zip(weights.iter()) {
            row.mapv_inplace(|value| value * w);
        }
        scaled
    }
}
