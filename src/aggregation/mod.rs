//! Pure statistics over observations that are already in memory.
//!
//! Nothing here touches storage or fails: empty input gives `None` or `0.0`.

pub mod dataset;
pub mod extrema;
pub mod grouping;
pub mod statistics;
