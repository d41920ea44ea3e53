//! Collection of oscillators.

pub mod sin_op;
