//! Small lookup tables and formatting helpers shared by the models and the
//! command generator.

pub mod number;
pub mod periodic;
