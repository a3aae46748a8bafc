//! Per-frequency regularized least-squares solve.
//!
//! L2 is a single damped solve of the weighted normal equations. L1 and Cauchy
//! start from that solution and run iteratively reweighted least squares, each
//! step being a pure `IrlsState -> IrlsState` transition.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use num_complex::Complex64;

use crate::math::matrix::MatrixHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{RadonError, RadonResult, Regularization};

/// Hard cap on reweighted solves per bin; hitting it is not an error.
pub const MAX_IRLS_ITERATIONS: usize = 10;
/// Relative cost change below which IRLS stops.
pub const IRLS_TOLERANCE: f64 = 1e-3;

/// Sparsity-promoting penalty driving the IRLS reweighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Penalty {
    L1,
    Cauchy,
}

impl Penalty {
    /// Diagonal of the reweighting matrix `Q` for the current model.
    pub fn reweight(self, model: ArrayView1<Complex64>, scale: f64) -> Array1<f64> {
        match self {
            Penalty::L1 => model.mapv(|r| 1.0 / (r.norm() + scale)),
            Penalty::Cauchy => model.mapv(|r| 1.0 / (r.norm_sqr() + scale)),
        }
    }

    /// `Σ|r|` for L1, `Σ ln(1 + |r|²/b)` for Cauchy.
    pub fn value(self, model: ArrayView1<Complex64>, scale: f64) -> f64 {
        match self {
            Penalty::L1 => model.iter().map(|r| r.norm()).sum(),
            Penalty::Cauchy => model
                .iter()
                .map(|r| (r.norm_sqr() / scale).ln_1p())
                .sum(),
        }
    }
}

/// Weighted normal equations `AᴴWA r = AᴴWd` of one frequency bin.
pub struct NormalSystem<'a> {
    operator: ArrayView2<'a, Complex64>,
    data: ArrayView1<'a, Complex64>,
    gram: Array2<Complex64>,
    projection: Array1<Complex64>,
}

impl<'a> NormalSystem<'a> {
    pub fn assemble(
        operator: ArrayView2<'a, Complex64>,
        weights: ArrayView1<f64>,
        data: ArrayView1<'a, Complex64>,
    ) -> Self {
        let gram = MatrixHelper::weighted_gram(operator, weights);
        let projection = MatrixHelper::weighted_projection(operator, weights, data);
        Self {
            operator,
            data,
            gram,
            projection,
        }
    }

    /// Damping `μ = |trace(AᴴWA)| · trade_off`.
    pub fn damping(&self, trade_off: f64) -> f64 {
        MatrixHelper::trace(self.gram.view()).norm() * trade_off
    }

    /// Solves `(AᴴWA + diag(diagonal)) r = AᴴWd`.
    pub fn solve_with_diagonal(&self, diagonal: ArrayView1<f64>) -> Option<Array1<Complex64>> {
        let system = MatrixHelper::add_diagonal(self.gram.view(), diagonal);
        MatrixHelper::solve(system.view(), self.projection.view())
    }

    /// Unweighted data misfit `‖d − A r‖₂`.
    pub fn misfit(&self, model: ArrayView1<Complex64>) -> f64 {
        let predicted = self.operator.dot(&model);
        let residual = &self.data - &predicted;
        StatsHelper::norm2(residual.iter())
    }
}

/// Iteration state carried between IRLS steps.
#[derive(Debug, Clone, PartialEq)]
pub struct IrlsState {
    pub model: Array1<Complex64>,
    pub cost: f64,
    pub iteration: usize,
    pub converged: bool,
}

/// IRLS parameters shared by every step of one bin.
#[derive(Debug, Clone, Copy)]
struct IrlsSetup {
    penalty: Penalty,
    lambda: f64,
    scale: f64,
}

impl IrlsSetup {
    fn cost(&self, system: &NormalSystem<'_>, model: ArrayView1<Complex64>) -> f64 {
        if self.lambda == 0.0 {
            return system.misfit(model);
        }
        system.misfit(model) + self.lambda * self.penalty.value(model, self.scale)
    }

    fn start(&self, system: &NormalSystem<'_>, model: Array1<Complex64>) -> IrlsState {
        let cost = self.cost(system, model.view());
        IrlsState {
            model,
            cost,
            iteration: 0,
            converged: false,
        }
    }

    fn step(&self, system: &NormalSystem<'_>, state: IrlsState) -> Option<IrlsState> {
        // λ = 0 leaves the plain normal equations; 1/|r| may be infinite there.
        let diagonal = if self.lambda == 0.0 {
            Array1::zeros(state.model.len())
        } else {
            let q = self.penalty.reweight(state.model.view(), self.scale);
            q.mapv(|value| self.lambda * value)
        };
        let model = system.solve_with_diagonal(diagonal.view())?;
        let cost = self.cost(system, model.view());
        let change = StatsHelper::relative_change(cost, state.cost);
        Some(IrlsState {
            model,
            cost,
            iteration: state.iteration + 1,
            converged: change < IRLS_TOLERANCE,
        })
    }
}

/// Outcome of solving one frequency bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSolution {
    pub column: Array1<Complex64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Regularized per-bin solver dispatching on the regularization variant.
#[derive(Debug, Clone, Copy)]
pub struct RegularizedSolver {
    regularization: Regularization,
}

impl RegularizedSolver {
    pub fn new(regularization: Regularization) -> Self {
        Self { regularization }
    }

    pub fn regularization(&self) -> Regularization {
        self.regularization
    }

    pub fn solve<'a>(
        &self,
        operator: ArrayView2<'a, Complex64>,
        weights: ArrayView1<f64>,
        data: ArrayView1<'a, Complex64>,
        bin: usize,
        frequency: f64,
    ) -> RadonResult<BinSolution> {
        let singular = || RadonError::LinearAlgebra { bin, frequency };
        let system = NormalSystem::assemble(operator, weights, data);
        let mu = system.damping(self.regularization.trade_off());
        let damping = Array1::from_elem(operator.ncols(), mu);
        let initial = system
            .solve_with_diagonal(damping.view())
            .ok_or_else(singular)?;

        let (penalty, scale) = match self.regularization {
            Regularization::L2 { .. } => {
                return Ok(BinSolution {
                    column: initial,
                    iterations: 0,
                    converged: true,
                })
            }
            Regularization::L1 { scale, .. } => (Penalty::L1, scale),
            Regularization::Cauchy { scale, .. } => (Penalty::Cauchy, scale),
        };

        let setup = IrlsSetup {
            penalty,
            lambda: mu * scale,
            scale,
        };
        let mut state = setup.start(&system, initial);
        while !state.converged && state.iteration < MAX_IRLS_ITERATIONS {
            state = setup.step(&system, state).ok_or_else(singular)?;
        }

        Ok(BinSolution {
            column: state.model,
            iterations: state.iteration,
            converged: state.converged,
        })
    }
}
