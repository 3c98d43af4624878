//! Data model for a simulation: the swept variable, the raw scalar values
//! that appear in function definitions, and the produced data points.

pub mod data_point;
pub mod scalar;
pub mod variable;

pub use data_point::{DataPoint, function_key};
pub use scalar::ScalarValue;
pub use variable::{DataType, SimulationVariable};
