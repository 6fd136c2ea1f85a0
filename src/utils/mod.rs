//! Utility modules shared by the generators.

pub mod date;
pub mod escape;
pub mod minify;
