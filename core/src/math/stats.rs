use num_complex::Complex64;

pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// Euclidean norm of a complex vector.
    pub fn norm2<'a, I>(values: I) -> f64
    where
        I: IntoIterator<Item = &'a Complex64>,
    {
        values
            .into_iter()
            .map(|value| value.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Symmetric relative change between two successive cost values.
    pub fn relative_change(current: f64, previous: f64) -> f64 {
        let denominator = current.abs() + previous.abs();
        if denominator == 0.0 {
            return 0.0;
        }
        2.0 * (current - previous).abs() / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_zero_sequence_yields_zero() {
        assert_eq!(StatsHelper::rms(&[]), 0.0);
        assert_eq!(StatsHelper::rms(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn rms_handles_single_value() {
        assert_eq!(StatsHelper::rms(&[4.0]), 4.0);
    }

    #[test]
    fn norm2_of_complex_vector() {
        let values = [Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)];
        assert!((StatsHelper::norm2(&values) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn relative_change_is_symmetric_and_zero_safe() {
        assert_eq!(StatsHelper::relative_change(0.0, 0.0), 0.0);
        assert!((StatsHelper::relative_change(3.0, 1.0) - 1.0).abs() < 1e-12);
        assert_eq!(
            StatsHelper::relative_change(3.0, 1.0),
            StatsHelper::relative_change(1.0, 3.0)
        );
    }
}
