//! Stealth Core - consequence resolution for a top-down stealth game
//!
//! Decides whether player actions succeed, fail quietly or end in capture,
//! and tracks the suspicion score that can end the session on its own.

pub mod actions;
pub mod capture;
pub mod core;
pub mod events;
pub mod interaction;
pub mod scenario;
pub mod session;
pub mod suspicion;
pub mod visibility;

pub use session::Session;
