//! Input-side helpers that decide *when* an attempt reaches the resolver

pub mod hold;
pub mod interactable;

pub use hold::HoldTrigger;
pub use interactable::Interactable;
