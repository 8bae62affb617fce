//! Persistence boundary for observations.

pub mod error;
pub mod repository;
