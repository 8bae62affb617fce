pub mod aggregates;
pub mod observation;
