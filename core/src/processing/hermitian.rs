use ndarray::{Array2, Axis};
use num_complex::Complex64;

/// Fills negative-frequency columns of a `[rows × F]` spectrum from the
/// explicitly computed forward bins `0..computed`.
pub struct HermitianReconstructor;

impl HermitianReconstructor {
    pub fn mirror(spectrum: &mut Array2<Complex64>, computed: usize) {
        let length = spectrum.ncols();
        for index in 1..computed.min(length) {
            let target = length - index;
            if target < computed {
                continue;
            }
            let source = spectrum.index_axis(Axis(1), index).mapv(|value| value.conj());
            spectrum.index_axis_mut(Axis(1), target).assign(&source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_bins_are_conjugates() {
        let length = 8;
        let computed = (length + 1) / 2;
        let mut spectrum = Array2::from_shape_fn((2, length), |(row, col)| {
            if col < computed {
                Complex64::new(row as f64 + col as f64, col as f64 - 1.5)
            } else {
                Complex64::new(0.0, 0.0)
            }
        });
        HermitianReconstructor::mirror(&mut spectrum, computed);

        for row in 0..2 {
            for i in 1..computed {
                assert_eq!(spectrum[[row, length - i]], spectrum[[row, i]].conj());
            }
            // Nyquist and DC stay untouched
            assert_eq!(spectrum[[row, 4]], Complex64::new(0.0, 0.0));
            assert_eq!(spectrum[[row, 0]], Complex64::new(row as f64, -1.5));
        }
    }

    #[test]
    fn odd_lengths_mirror_every_negative_bin() {
        let length = 5;
        let computed = (length + 1) / 2;
        let mut spectrum =
            Array2::from_shape_fn((1, length), |(_, col)| Complex64::new(col as f64, 1.0));
        HermitianReconstructor::mirror(&mut spectrum, computed);
        assert_eq!(spectrum[[0, 4]], Complex64::new(1.0, -1.0));
        assert_eq!(spectrum[[0, 3]], Complex64::new(2.0, -1.0));
    }
}
