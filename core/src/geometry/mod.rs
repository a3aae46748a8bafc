pub mod axis;
pub mod survey;
pub mod timeshift;

pub use axis::TimeAxis;
pub use survey::Survey;
pub use timeshift::TimeShiftMatrix;
