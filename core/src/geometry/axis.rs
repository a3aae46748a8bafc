use crate::math::fft::padded_length;
use crate::prelude::{RadonError, RadonResult};

/// Uniformly sampled time axis of a gather or Radon panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    samples: Vec<f64>,
    interval: f64,
}

impl TimeAxis {
    /// Takes the sampling interval from the first two samples.
    pub fn new(samples: &[f64]) -> RadonResult<Self> {
        if samples.len() < 2 {
            return Err(RadonError::InvalidAxis(format!(
                "time axis needs at least two samples, got {}",
                samples.len()
            )));
        }
        let interval = samples[1] - samples[0];
        if interval == 0.0 || !interval.is_finite() {
            return Err(RadonError::InvalidAxis(format!(
                "time axis spacing must be finite and non-zero, got {}",
                interval
            )));
        }
        Ok(Self {
            samples: samples.to_vec(),
            interval,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Zero-padded transform length used for this axis.
    pub fn transform_length(&self) -> usize {
        padded_length(self.len())
    }

    /// Number of forward-frequency bins solved explicitly; the rest are mirrored.
    pub fn computed_bins(&self) -> usize {
        (self.transform_length() + 1) / 2
    }

    /// Frequency of bin `index` for a transform of length `length`.
    ///
    /// The sample rate keeps the sign of `t0 - t1`, so an increasing axis yields
    /// negative frequencies and the operator delays each trace by its shift.
    pub fn bin_frequency(&self, index: usize, length: usize) -> f64 {
        index as f64 / (length as f64 * -self.interval)
    }
}

/// Checks a coordinate axis is non-empty and finite.
pub(crate) fn validate_coordinates(name: &str, values: &[f64]) -> RadonResult<()> {
    if values.is_empty() {
        return Err(RadonError::InvalidAxis(format!("{} axis is empty", name)));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(RadonError::InvalidAxis(format!(
            "{} axis contains non-finite value {}",
            name, bad
        )));
    }
    Ok(())
}
