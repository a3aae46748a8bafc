use crate::generator::profile::{add_noise, build_radon_model};
use crate::generator::template::ricker_half_width;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use ndarray::Array2;
use radoncore::gather::{nearest_index, Gather};
use radoncore::math::StatsHelper;
use radoncore::telemetry::MetricsSnapshot;
use radoncore::{RadonForwardEngine, RadonInverseEngine, Survey};
use serde::Serialize;

/// How well one synthetic pick came back from the inversion.
#[derive(Debug, Clone, Serialize)]
pub struct PickRecovery {
    pub slowness: f64,
    pub time: f64,
    pub expected_index: usize,
    pub recovered_index: usize,
}

impl PickRecovery {
    pub fn is_exact(&self) -> bool {
        self.expected_index == self.recovered_index
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub radon_shape: (usize, usize),
    pub traces_inverted: usize,
    pub recoveries: Vec<PickRecovery>,
    pub data_rms: f64,
    pub misfit_rms: f64,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let config = &self.config;
        let time = config.time_axis();
        let slowness = config.slowness_axis();

        let model = build_radon_model(config).context("building synthetic radon model")?;
        let acquisition = Survey::new(
            &time,
            &config.distances,
            &slowness,
            config.reference_distance,
            config.path,
        )
        .context("validating acquisition geometry")?;
        let mut data = RadonForwardEngine::new(acquisition)
            .context("building forward engine")?
            .synthesize(model.view())
            .context("synthesizing move-out data")?;
        add_noise(&mut data, config.noise, config.seed);

        let mut gather = Gather::new(time.clone(), config.distances.clone(), data)
            .context("assembling gather")?;
        if config.normalize {
            gather.normalize_traces();
        }
        if let Some(bins) = config.stack_bins {
            gather = gather
                .stacked(bins, config.root_order)
                .context("partially stacking gather")?;
        }

        let survey = Survey::new(
            &time,
            &gather.distances,
            &slowness,
            config.reference_distance,
            config.path,
        )
        .context("validating inversion geometry")?;
        let inverse = RadonInverseEngine::new(
            survey.clone(),
            &gather.weights,
            config.to_regularization()?,
        )
        .context("building inverse engine")?;
        let (radon, metrics) = inverse
            .invert_with_metrics(gather.data.view())
            .context("inverting gather")?;

        let predicted = RadonForwardEngine::new(survey)
            .context("building re-synthesis engine")?
            .synthesize(radon.view())
            .context("re-synthesizing data")?;
        let residual = &gather.data - &predicted;

        let recoveries = self.recover_picks(&radon, &time, &slowness);

        Ok(WorkflowResult {
            radon_shape: radon.dim(),
            traces_inverted: gather.trace_count(),
            recoveries,
            data_rms: rms(&gather.data),
            misfit_rms: rms(&residual),
            metrics,
        })
    }

    /// Slowness row of peak energy in a one-period window around each pick time.
    fn recover_picks(&self, radon: &Array2<f64>, time: &[f64], slowness: &[f64]) -> Vec<PickRecovery> {
        let half_width = ricker_half_width(self.config.wavelet_frequency, self.config.interval);
        self.config
            .picks
            .iter()
            .filter_map(|pick| {
                let expected_index = nearest_index(slowness, pick.slowness)?;
                let center = nearest_index(time, pick.time)?;
                let start = center.saturating_sub(half_width);
                let end = (center + half_width + 1).min(time.len());
                let recovered_index = radon
                    .rows()
                    .into_iter()
                    .map(|row| {
                        row.iter()
                            .skip(start)
                            .take(end - start)
                            .map(|v| v * v)
                            .sum::<f64>()
                    })
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(idx, _)| idx)?;
                Some(PickRecovery {
                    slowness: pick.slowness,
                    time: pick.time,
                    expected_index,
                    recovered_index,
                })
            })
            .collect()
    }
}

fn rms(panel: &Array2<f64>) -> f64 {
    panel
        .as_slice()
        .map(StatsHelper::rms)
        .unwrap_or_else(|| StatsHelper::rms(&panel.iter().copied().collect::<Vec<_>>()))
}
