use ndarray::{Array1, Array2, ArrayView2};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::geometry::{Survey, TimeShiftMatrix};
use crate::prelude::{RadonError, RadonResult, Regularization};
use crate::processing::hermitian::HermitianReconstructor;
use crate::processing::operator::FrequencyOperator;
use crate::processing::solver::RegularizedSolver;
use crate::processing::spectrum::SpectrumBuffer;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsSnapshot, SolveMetrics};

/// Inverts move-out data `[Nd × Nt]` into a Radon panel `[Np × Nt]`.
///
/// Construction validates the weights. Each call validates the data shape,
/// then builds the time-shift matrix, solves the forward bins in parallel,
/// mirrors the rest and truncates back to `Nt` samples. A singular bin aborts
/// the whole call with [`RadonError::LinearAlgebra`].
///
/// Solve counters are kept per call, so one engine can serve concurrent calls.
pub struct RadonInverseEngine {
    survey: Survey,
    weights: Array1<f64>,
    solver: RegularizedSolver,
    logger: LogManager,
    last_run: SolveMetrics,
}

impl RadonInverseEngine {
    pub fn new(survey: Survey, weights: &[f64], regularization: Regularization) -> RadonResult<Self> {
        let traces = survey.distances().len();
        if weights.len() != traces {
            return Err(RadonError::ShapeMismatch(format!(
                "weight vector has {} entries for {} traces",
                weights.len(),
                traces
            )));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(RadonError::InvalidInput(format!(
                "weights must be finite and non-negative, got {}",
                bad
            )));
        }

        Ok(Self {
            survey,
            weights: Array1::from(weights.to_vec()),
            solver: RegularizedSolver::new(regularization),
            logger: LogManager::new("radon-inverse"),
            last_run: SolveMetrics::new(),
        })
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Counters of the most recently finished call, failed ones included.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.last_run.snapshot()
    }

    /// Full `[Np × F]` Radon spectrum before the inverse transform and truncation.
    pub fn spectrum(&self, data: ArrayView2<f64>) -> RadonResult<Array2<Complex64>> {
        self.solve_spectrum(data).map(|(spectrum, _)| spectrum)
    }

    /// Radon panel `[Np × Nt]`.
    pub fn invert(&self, data: ArrayView2<f64>) -> RadonResult<Array2<f64>> {
        self.invert_with_metrics(data).map(|(radon, _)| radon)
    }

    /// Radon panel together with the solve counters of this call.
    pub fn invert_with_metrics(
        &self,
        data: ArrayView2<f64>,
    ) -> RadonResult<(Array2<f64>, MetricsSnapshot)> {
        let (spectrum, snapshot) = self.solve_spectrum(data)?;
        let time = self.survey.time();
        let radon = SpectrumBuffer::new(time.transform_length()).synthesize(spectrum.view(), time.len());
        Ok((radon, snapshot))
    }

    fn solve_spectrum(
        &self,
        data: ArrayView2<f64>,
    ) -> RadonResult<(Array2<Complex64>, MetricsSnapshot)> {
        let expected = self.survey.data_shape();
        if data.dim() != expected {
            return Err(RadonError::ShapeMismatch(format!(
                "data matrix is {:?}, expected {:?} (distances × samples)",
                data.dim(),
                expected
            )));
        }

        let shifts = self.survey.time_shifts()?;
        let time = self.survey.time();
        let length = time.transform_length();
        let computed = time.computed_bins();
        let slowness_count = shifts.slowness_count();
        self.logger.record(&format!(
            "{} inversion: {} traces, {} slowness values, {} bins of {}",
            self.solver.regularization().model(),
            expected.0,
            slowness_count,
            computed,
            length
        ));

        let metrics = SolveMetrics::new();
        let data_spectrum = SpectrumBuffer::new(length).analyze(data);
        let columns = (0..computed)
            .into_par_iter()
            .map(|bin| self.solve_bin(bin, &shifts, &data_spectrum, length, &metrics))
            .collect::<RadonResult<Vec<_>>>();
        let snapshot = metrics.snapshot();
        self.last_run.store(snapshot);
        let columns = columns?;

        let mut spectrum = Array2::<Complex64>::zeros((slowness_count, length));
        for (bin, column) in columns.into_iter().enumerate() {
            spectrum.column_mut(bin).assign(&column);
        }
        HermitianReconstructor::mirror(&mut spectrum, computed);

        self.logger.record(&format!(
            "solved {} bins, {} IRLS iterations, {} at iteration cap",
            snapshot.bins_solved, snapshot.irls_iterations, snapshot.unconverged_bins
        ));
        Ok((spectrum, snapshot))
    }

    fn solve_bin(
        &self,
        bin: usize,
        shifts: &TimeShiftMatrix,
        data_spectrum: &Array2<Complex64>,
        length: usize,
        metrics: &SolveMetrics,
    ) -> RadonResult<Array1<Complex64>> {
        let frequency = self.survey.time().bin_frequency(bin, length);
        let operator = FrequencyOperator::at(shifts, frequency);
        match self.solver.solve(
            operator.view(),
            self.weights.view(),
            data_spectrum.column(bin),
            bin,
            frequency,
        ) {
            Ok(solution) => {
                metrics.record_bin(solution.iterations, solution.converged);
                if !solution.converged {
                    self.logger.detail(&format!(
                        "bin {} stopped at {} IRLS iterations",
                        bin, solution.iterations
                    ));
                }
                Ok(solution.column)
            }
            Err(err) => {
                metrics.record_failure();
                self.logger.detail(&format!("bin {} failed: {}", bin, err));
                Err(err)
            }
        }
    }
}
