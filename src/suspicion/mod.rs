pub mod meter;

pub use meter::{SuspicionMeter, SuspicionState};
