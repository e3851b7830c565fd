//! Core compute primitives.
//!
//! The dense row-major [`Matrix`] holds feature values for training and
//! prediction.

mod matrix;

pub use matrix::Matrix;
