//! Function-style entry points over the forward and inverse engines.
//!
//! Inputs are borrowed read-only; outputs are freshly allocated panels.
//! Validation (axes, hyperparameter count, weight length, panel shape)
//! completes before any transform work starts.

use ndarray::{Array2, ArrayView2};

use crate::geometry::Survey;
use crate::prelude::{PathModel, RadonResult, Regularization, RegularizationModel};
use crate::processing::{RadonForwardEngine, RadonInverseEngine};

/// Inverts move-out data `[distance × time]` into a Radon panel `[slowness × time]`.
#[allow(clippy::too_many_arguments)]
pub fn radon_inverse(
    time_axis: &[f64],
    distance_axis: &[f64],
    data: ArrayView2<f64>,
    slowness_axis: &[f64],
    weights: &[f64],
    reference_distance: f64,
    path: PathModel,
    model: RegularizationModel,
    hyperparameters: &[f64],
) -> RadonResult<Array2<f64>> {
    let survey = Survey::new(
        time_axis,
        distance_axis,
        slowness_axis,
        reference_distance,
        path,
    )?;
    let regularization = Regularization::from_model(model, hyperparameters)?;
    RadonInverseEngine::new(survey, weights, regularization)?.invert(data)
}

/// Synthesizes move-out data `[distance × time]` from a Radon panel `[slowness × time]`.
pub fn radon_forward(
    time_axis: &[f64],
    slowness_axis: &[f64],
    radon: ArrayView2<f64>,
    distance_axis: &[f64],
    reference_distance: f64,
    path: PathModel,
) -> RadonResult<Array2<f64>> {
    let survey = Survey::new(
        time_axis,
        distance_axis,
        slowness_axis,
        reference_distance,
        path,
    )?;
    RadonForwardEngine::new(survey)?.synthesize(radon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gather::axis::{linspace, uniform_time_axis};
    use crate::prelude::RadonError;

    struct Layout {
        time: Vec<f64>,
        distances: Vec<f64>,
        slowness: Vec<f64>,
        reference: f64,
    }

    fn dense_layout() -> Layout {
        Layout {
            time: uniform_time_axis(128, 0.01),
            distances: (0..24).map(|d| d as f64).collect(),
            slowness: linspace(-0.05, 0.05, 11),
            reference: 11.5,
        }
    }

    fn example_layout() -> Layout {
        Layout {
            time: uniform_time_axis(64, 0.01),
            distances: vec![0.0, 10.0, 20.0, 30.0],
            slowness: linspace(-0.1, 0.1, 21),
            reference: 15.0,
        }
    }

    fn spike_model(layout: &Layout, picks: &[(usize, usize, f64)]) -> Array2<f64> {
        let mut radon = Array2::zeros((layout.slowness.len(), layout.time.len()));
        for &(p, t, amplitude) in picks {
            radon[[p, t]] = amplitude;
        }
        radon
    }

    fn forward(layout: &Layout, radon: &Array2<f64>) -> Array2<f64> {
        radon_forward(
            &layout.time,
            &layout.slowness,
            radon.view(),
            &layout.distances,
            layout.reference,
            PathModel::Linear,
        )
        .unwrap()
    }

    fn inverse(
        layout: &Layout,
        data: &Array2<f64>,
        model: RegularizationModel,
        hyperparameters: &[f64],
    ) -> RadonResult<Array2<f64>> {
        radon_inverse(
            &layout.time,
            &layout.distances,
            data.view(),
            &layout.slowness,
            &vec![1.0; layout.distances.len()],
            layout.reference,
            PathModel::Linear,
            model,
            hyperparameters,
        )
    }

    fn strongest_row(radon: &Array2<f64>) -> usize {
        radon
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|v| v * v).sum::<f64>())
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
            .unwrap()
    }

    #[test]
    fn example_gather_yields_finite_panel_of_expected_shape() {
        let layout = example_layout();
        let data = Array2::from_shape_fn((4, 64), |(j, t)| {
            ((t as f64) * 0.3 + j as f64).sin() * (-(t as f64 - 32.0).powi(2) / 50.0).exp()
        });
        let radon = inverse(&layout, &data, RegularizationModel::L2, &[0.01]).unwrap();
        assert_eq!(radon.dim(), (21, 64));
        assert!(radon.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn sparse_model_round_trip_recovers_slowness() {
        let layout = dense_layout();
        let truth = spike_model(&layout, &[(7, 64, 1.0)]);
        let data = forward(&layout, &truth);

        let radon = inverse(&layout, &data, RegularizationModel::L2, &[1e-3]).unwrap();
        assert_eq!(radon.dim(), (11, 128));
        let row = strongest_row(&radon);
        assert!((row as i64 - 7).abs() <= 1);

        let peak_time = radon
            .row(7)
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(peak_time, 64);
    }

    #[test]
    fn parabolic_round_trip_recovers_curvature() {
        let layout = Layout {
            slowness: linspace(-0.001, 0.001, 11),
            ..dense_layout()
        };
        let truth = spike_model(&layout, &[(7, 64, 1.0)]);
        let data = radon_forward(
            &layout.time,
            &layout.slowness,
            truth.view(),
            &layout.distances,
            layout.reference,
            PathModel::Parabolic,
        )
        .unwrap();

        let radon = radon_inverse(
            &layout.time,
            &layout.distances,
            data.view(),
            &layout.slowness,
            &vec![1.0; layout.distances.len()],
            layout.reference,
            PathModel::Parabolic,
            RegularizationModel::L2,
            &[1e-3],
        )
        .unwrap();
        assert_eq!(strongest_row(&radon), 7);
        let peak_time = radon
            .row(7)
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(peak_time, 64);
    }

    #[test]
    fn zero_scale_irls_aborts_on_the_rank_deficient_dc_bin() {
        let layout = Layout {
            distances: (0..8).map(|d| d as f64).collect(),
            slowness: vec![-0.02, 0.0, 0.02],
            reference: 3.5,
            ..example_layout()
        };
        let truth = spike_model(&layout, &[(2, 20, 1.0)]);
        let data = forward(&layout, &truth);
        let err = inverse(&layout, &data, RegularizationModel::L1, &[0.01, 0.0]).unwrap_err();
        assert!(matches!(err, RadonError::LinearAlgebra { .. }));
    }

    #[test]
    fn irls_round_trips_keep_the_pick() {
        let layout = dense_layout();
        let truth = spike_model(&layout, &[(7, 64, 1.0)]);
        let data = forward(&layout, &truth);

        for model in [RegularizationModel::L1, RegularizationModel::Cauchy] {
            let radon = inverse(&layout, &data, model, &[1e-3, 0.1]).unwrap();
            assert!(radon.iter().all(|v| v.is_finite()));
            assert!((strongest_row(&radon) as i64 - 7).abs() <= 1);
        }
    }

    #[test]
    fn forward_is_linear() {
        let layout = dense_layout();
        let first = spike_model(&layout, &[(2, 40, 1.0), (9, 90, -0.5)]);
        let second = spike_model(&layout, &[(5, 70, 2.0)]);
        let (a, b) = (1.5, -0.25);
        let combined = &first * a + &second * b;

        let lhs = forward(&layout, &combined);
        let rhs = forward(&layout, &first) * a + forward(&layout, &second) * b;
        for (l, r) in lhs.iter().zip(rhs.iter()) {
            assert!((l - r).abs() < 1e-9);
        }
    }

    #[test]
    fn inverse_spectrum_is_hermitian_with_real_dc() {
        let layout = example_layout();
        let data = Array2::from_shape_fn((4, 64), |(j, t)| ((t * (j + 1)) as f64 * 0.1).cos());
        let survey = Survey::new(
            &layout.time,
            &layout.distances,
            &layout.slowness,
            layout.reference,
            PathModel::Linear,
        )
        .unwrap();
        let regularization = Regularization::from_model(RegularizationModel::L2, &[0.01]).unwrap();
        let engine = RadonInverseEngine::new(survey, &[1.0; 4], regularization).unwrap();
        let spectrum = engine.spectrum(data.view()).unwrap();

        let length = spectrum.ncols();
        assert_eq!(length, 128);
        for row in spectrum.rows() {
            for i in 1..length / 2 {
                assert_eq!(row[length - i], row[i].conj());
            }
            let dc = row[0];
            assert!(dc.im.abs() <= 1e-9 * dc.norm().max(1.0));
        }
    }

    #[test]
    fn extra_data_row_is_a_shape_mismatch() {
        let layout = example_layout();
        let data = Array2::<f64>::zeros((5, 64));
        let err = inverse(&layout, &data, RegularizationModel::L2, &[0.01]).unwrap_err();
        assert!(matches!(err, RadonError::ShapeMismatch(_)));
    }

    #[test]
    fn l1_with_one_hyperparameter_is_rejected() {
        let layout = example_layout();
        let data = Array2::<f64>::zeros((4, 64));
        let err = inverse(&layout, &data, RegularizationModel::L1, &[0.01]).unwrap_err();
        assert!(matches!(
            err,
            RadonError::HyperparameterCount {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn forward_rejects_mismatched_radon_panel() {
        let layout = example_layout();
        let radon = Array2::<f64>::zeros((20, 64));
        let err = radon_forward(
            &layout.time,
            &layout.slowness,
            radon.view(),
            &layout.distances,
            layout.reference,
            PathModel::Parabolic,
        )
        .unwrap_err();
        assert!(matches!(err, RadonError::ShapeMismatch(_)));
    }
}
