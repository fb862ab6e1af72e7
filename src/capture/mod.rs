pub mod gate;

pub use gate::{CaptureGate, CaptureReason, CaptureState};
