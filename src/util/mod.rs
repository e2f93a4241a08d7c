//! Utility functions

mod parse;

pub use parse::{parse_value, parse_values};
