use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path function used to turn slowness into per-trace time shifts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathModel {
    #[default]
    Linear,
    Parabolic,
}

impl FromStr for PathModel {
    type Err = RadonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "linear" => Ok(PathModel::Linear),
            "parabolic" => Ok(PathModel::Parabolic),
            other => Err(RadonError::InvalidInput(format!(
                "unknown path model '{}'",
                other
            ))),
        }
    }
}

/// Regularization schema selected by name, before hyperparameters are attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegularizationModel {
    #[default]
    L2,
    L1,
    Cauchy,
}

impl RegularizationModel {
    /// Number of hyperparameters the model consumes.
    pub fn hyperparameter_count(self) -> usize {
        match self {
            RegularizationModel::L2 => 1,
            RegularizationModel::L1 | RegularizationModel::Cauchy => 2,
        }
    }
}

impl fmt::Display for RegularizationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegularizationModel::L2 => "L2",
            RegularizationModel::L1 => "L1",
            RegularizationModel::Cauchy => "Cauchy",
        };
        f.write_str(name)
    }
}

impl FromStr for RegularizationModel {
    type Err = RadonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "l2" => Ok(RegularizationModel::L2),
            "l1" => Ok(RegularizationModel::L1),
            "cauchy" => Ok(RegularizationModel::Cauchy),
            other => Err(RadonError::InvalidInput(format!(
                "unknown regularization model '{}'",
                other
            ))),
        }
    }
}

/// Regularization with its hyperparameters attached.
///
/// `trade_off` scales the damping relative to `|trace(AᴴWA)|`; `scale` is the
/// additive constant `b` of the IRLS reweighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regularization {
    L2 { trade_off: f64 },
    L1 { trade_off: f64, scale: f64 },
    Cauchy { trade_off: f64, scale: f64 },
}

impl Regularization {
    pub fn from_model(model: RegularizationModel, hyperparameters: &[f64]) -> RadonResult<Self> {
        let expected = model.hyperparameter_count();
        if hyperparameters.len() != expected {
            return Err(RadonError::HyperparameterCount {
                model,
                expected,
                actual: hyperparameters.len(),
            });
        }

        if let Some(bad) = hyperparameters
            .iter()
            .find(|value| !value.is_finite() || **value < 0.0)
        {
            return Err(RadonError::InvalidHyperparameter(format!(
                "hyperparameters must be finite and non-negative, got {}",
                bad
            )));
        }

        let trade_off = hyperparameters[0];
        match model {
            RegularizationModel::L2 => Ok(Regularization::L2 { trade_off }),
            RegularizationModel::L1 => Ok(Regularization::L1 {
                trade_off,
                scale: hyperparameters[1],
            }),
            RegularizationModel::Cauchy => Ok(Regularization::Cauchy {
                trade_off,
                scale: hyperparameters[1],
            }),
        }
    }

    pub fn model(&self) -> RegularizationModel {
        match self {
            Regularization::L2 { .. } => RegularizationModel::L2,
            Regularization::L1 { .. } => RegularizationModel::L1,
            Regularization::Cauchy { .. } => RegularizationModel::Cauchy,
        }
    }

    pub fn trade_off(&self) -> f64 {
        match *self {
            Regularization::L2 { trade_off }
            | Regularization::L1 { trade_off, .. }
            | Regularization::Cauchy { trade_off, .. } => trade_off,
        }
    }
}

/// Common error type for transform execution.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RadonError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("{model} regularization takes {expected} hyperparameter(s), got {actual}")]
    HyperparameterCount {
        model: RegularizationModel,
        expected: usize,
        actual: usize,
    },
    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),
    #[error("invalid axis: {0}")]
    InvalidAxis(String),
    #[error("singular normal equations at frequency bin {bin} ({frequency:.4} Hz)")]
    LinearAlgebra { bin: usize, frequency: f64 },
    #[error("invalid partial stack: {0}")]
    InvalidStack(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type RadonResult<T> = Result<T, RadonError>;
