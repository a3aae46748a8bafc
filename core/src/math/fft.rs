use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Length of the zero-padded transform: the smallest power of two holding
/// twice the trace length.
pub fn padded_length(samples: usize) -> usize {
    (2 * samples.max(1)).next_power_of_two()
}

/// Helper that wraps the `rustfft` planner for reuse across rows.
pub struct FftHelper {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        let scratch = vec![Complex64::zero(); scratch_len];
        Self {
            forward,
            inverse,
            scratch,
        }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero-pads a real trace to the planned length and transforms it.
    pub fn forward_real(&mut self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.len())
            .map(|&value| Complex64::new(value, 0.0))
            .collect();
        buffer.resize(self.len(), Complex64::zero());

        self.forward
            .process_with_scratch(&mut buffer, &mut self.scratch);
        buffer
    }

    /// Inverse transform normalized by 1/N.
    pub fn inverse(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = input.to_vec();
        buffer.resize(self.len(), Complex64::zero());

        self.inverse
            .process_with_scratch(&mut buffer, &mut self.scratch);
        let scale = 1.0 / self.len() as f64;
        buffer.iter_mut().for_each(|value| *value *= scale);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_length_doubles_to_power_of_two() {
        assert_eq!(padded_length(64), 128);
        assert_eq!(padded_length(100), 256);
        assert_eq!(padded_length(1), 2);
    }

    #[test]
    fn fft_helper_returns_planned_length() {
        let mut helper = FftHelper::new(8);
        let output = helper.forward_real(&[1.0, 0.0, -1.0, 0.0]);
        assert_eq!(output.len(), 8);
        assert_eq!(output[0], Complex64::zero());
    }

    #[test]
    fn inverse_undoes_forward() {
        let mut helper = FftHelper::new(16);
        let trace = [0.5, -1.0, 2.0, 0.25, 0.0, 3.0];
        let spectrum = helper.forward_real(&trace);
        let restored = helper.inverse(&spectrum);
        for (idx, value) in restored.iter().enumerate() {
            let expected = trace.get(idx).copied().unwrap_or(0.0);
            assert!((value.re - expected).abs() < 1e-12);
            assert!(value.im.abs() < 1e-12);
        }
    }
}
