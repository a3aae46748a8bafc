use std::f64::consts::PI;

/// Ricker wavelet with peak frequency `frequency` (Hz), evaluated at `time` (s)
/// relative to its center.
pub fn ricker(time: f64, frequency: f64) -> f64 {
    let arg = (PI * frequency * time).powi(2);
    (1.0 - 2.0 * arg) * (-arg).exp()
}

/// Half-width in samples of the Ricker main lobe and side lobes.
pub fn ricker_half_width(frequency: f64, interval: f64) -> usize {
    if frequency <= 0.0 || interval <= 0.0 {
        return 0;
    }
    (1.0 / (frequency * interval)).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ricker_peaks_at_center_with_negative_side_lobes() {
        assert_eq!(ricker(0.0, 10.0), 1.0);
        assert!(ricker(0.05, 10.0) < 0.0);
        assert!(ricker(0.5, 10.0).abs() < 1e-6);
    }

    #[test]
    fn half_width_covers_one_period() {
        assert_eq!(ricker_half_width(10.0, 0.01), 10);
        assert_eq!(ricker_half_width(0.0, 0.01), 0);
    }
}
