use anyhow::Context;
use radoncore::gather::{linspace, uniform_time_axis};
use radoncore::{PathModel, Regularization, RegularizationModel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Slowness grid of the Radon panel, in s/km.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlownessRange {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl SlownessRange {
    pub fn values(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.count)
    }
}

/// A synthetic arrival placed in the Radon model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub slowness: f64,
    pub time: f64,
    #[serde(default = "unit_amplitude")]
    pub amplitude: f64,
}

fn unit_amplitude() -> f64 {
    1.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub samples: usize,
    pub interval: f64,
    pub distances: Vec<f64>,
    pub slowness: SlownessRange,
    pub reference_distance: f64,
    pub path: PathModel,
    pub regularization: RegularizationModel,
    pub hyperparameters: Vec<f64>,
    pub picks: Vec<Pick>,
    pub wavelet_frequency: f64,
    pub noise: f64,
    pub seed: u64,
    /// Scale every trace to unit peak amplitude before stacking and inversion.
    pub normalize: bool,
    pub stack_bins: Option<usize>,
    pub root_order: Option<f64>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            samples: 256,
            interval: 0.01,
            distances: (0..24).map(|d| d as f64).collect(),
            slowness: SlownessRange {
                min: -0.05,
                max: 0.05,
                count: 21,
            },
            reference_distance: 11.5,
            path: PathModel::Linear,
            regularization: RegularizationModel::L2,
            hyperparameters: vec![0.01],
            picks: vec![
                Pick {
                    slowness: 0.02,
                    time: 0.8,
                    amplitude: 1.0,
                },
                Pick {
                    slowness: -0.03,
                    time: 1.6,
                    amplitude: -0.7,
                },
            ],
            wavelet_frequency: 8.0,
            noise: 0.0,
            seed: 0,
            normalize: false,
            stack_bins: None,
            root_order: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Default scenario with the inversion model and hyperparameters replaced.
    pub fn from_args(samples: usize, regularization: RegularizationModel, hyperparameters: Vec<f64>) -> Self {
        Self {
            samples,
            regularization,
            hyperparameters,
            ..Default::default()
        }
    }

    pub fn time_axis(&self) -> Vec<f64> {
        uniform_time_axis(self.samples, self.interval)
    }

    pub fn slowness_axis(&self) -> Vec<f64> {
        self.slowness.values()
    }

    pub fn to_regularization(&self) -> anyhow::Result<Regularization> {
        Regularization::from_model(self.regularization, &self.hyperparameters)
            .context("building regularization from workflow config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_regularization() {
        let cfg = WorkflowConfig::from_args(128, RegularizationModel::Cauchy, vec![0.01, 0.1]);
        assert_eq!(cfg.time_axis().len(), 128);
        assert_eq!(
            cfg.to_regularization().unwrap(),
            Regularization::Cauchy {
                trade_off: 0.01,
                scale: 0.1
            }
        );
    }

    #[test]
    fn config_with_wrong_hyperparameter_count_fails() {
        let cfg = WorkflowConfig::from_args(64, RegularizationModel::L1, vec![0.01]);
        assert!(cfg.to_regularization().is_err());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"samples: 128\npath: parabolic\nregularization: L1\nhyperparameters: [0.02, 0.5]\n\
slowness: {min: -0.1, max: 0.1, count: 5}\npicks:\n  - {slowness: 0.05, time: 0.4}\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.samples, 128);
        assert_eq!(cfg.path, PathModel::Parabolic);
        assert_eq!(cfg.regularization, RegularizationModel::L1);
        assert_eq!(cfg.slowness_axis().len(), 5);
        assert_eq!(cfg.picks[0].amplitude, 1.0);
        assert_eq!(cfg.interval, 0.01);
    }
}
