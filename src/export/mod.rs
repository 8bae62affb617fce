//! Writing observations out for other tools.

pub mod error;
pub mod json;
