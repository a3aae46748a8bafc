use ndarray::{Array2, ArrayView2, Axis};
use num_complex::Complex64;

use crate::math::fft::FftHelper;

/// Row-wise transforms between real `[rows × Nt]` panels and zero-padded
/// `[rows × F]` spectra.
pub struct SpectrumBuffer {
    fft: FftHelper,
}

impl SpectrumBuffer {
    pub fn new(length: usize) -> Self {
        Self {
            fft: FftHelper::new(length),
        }
    }

    pub fn length(&self) -> usize {
        self.fft.len()
    }

    /// Forward transform of every row, zero-padded to the buffer length.
    pub fn analyze(&mut self, panel: ArrayView2<f64>) -> Array2<Complex64> {
        let length = self.length();
        let mut spectrum = Array2::zeros((panel.nrows(), length));
        for (row, mut target) in panel
            .axis_iter(Axis(0))
            .zip(spectrum.axis_iter_mut(Axis(0)))
        {
            let trace = row.to_vec();
            let transformed = self.fft.forward_real(&trace);
            target
                .iter_mut()
                .zip(transformed)
                .for_each(|(slot, value)| *slot = value);
        }
        spectrum
    }

    /// Inverse transform of every row, keeping the real part of the first
    /// `samples` values and dropping the padding tail.
    pub fn synthesize(&mut self, spectrum: ArrayView2<Complex64>, samples: usize) -> Array2<f64> {
        let samples = samples.min(self.length());
        let mut panel = Array2::zeros((spectrum.nrows(), samples));
        for (row, mut target) in spectrum
            .axis_iter(Axis(0))
            .zip(panel.axis_iter_mut(Axis(0)))
        {
            let values = row.to_vec();
            let restored = self.fft.inverse(&values);
            target
                .iter_mut()
                .zip(restored.iter().take(samples))
                .for_each(|(slot, value)| *slot = value.re);
        }
        panel
    }
}
