pub mod fft;
pub mod matrix;
pub mod stats;

pub use fft::{padded_length, FftHelper};
pub use matrix::MatrixHelper;
pub use stats::StatsHelper;
