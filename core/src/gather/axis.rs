/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Time axis of `samples` values starting at zero with spacing `interval`.
pub fn uniform_time_axis(samples: usize, interval: f64) -> Vec<f64> {
    (0..samples).map(|i| i as f64 * interval).collect()
}

/// Index of the axis value nearest to `value`.
pub fn nearest_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter()
        .enumerate()
        .min_by(|a, b| (a.1 - value).abs().total_cmp(&(b.1 - value).abs()))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let values = linspace(-0.1, 0.1, 21);
        assert_eq!(values.len(), 21);
        assert_eq!(values[0], -0.1);
        assert_eq!(values[20], 0.1);
        assert!(values[10].abs() < 1e-12);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn nearest_index_picks_closest_sample() {
        let axis = uniform_time_axis(5, 0.5);
        assert_eq!(axis, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(nearest_index(&axis, 1.2), Some(2));
        assert_eq!(nearest_index(&axis, 9.0), Some(4));
        assert_eq!(nearest_index(&[], 1.0), None);
    }
}
