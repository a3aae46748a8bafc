//! Frequency-domain Radon transform for move-out data.
//!
//! Data recorded across offsets is decomposed into slowness and intercept
//! time by solving a regularized least-squares problem per frequency bin
//! (L2 closed form, or L1/Cauchy through IRLS), and Radon panels are turned
//! back into move-out data by direct operator application.

pub mod api;
pub mod gather;
pub mod geometry;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use api::{radon_forward, radon_inverse};
pub use geometry::Survey;
pub use prelude::{PathModel, RadonError, RadonResult, Regularization, RegularizationModel};
pub use processing::{RadonForwardEngine, RadonInverseEngine};
