pub mod forward;
pub mod hermitian;
pub mod inverse;
pub mod operator;
pub mod solver;
pub mod spectrum;

pub use forward::RadonForwardEngine;
pub use hermitian::HermitianReconstructor;
pub use inverse::RadonInverseEngine;
pub use operator::FrequencyOperator;
pub use solver::{BinSolution, IrlsState, Penalty, RegularizedSolver};
pub use spectrum::SpectrumBuffer;
