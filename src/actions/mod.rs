pub mod kind;
pub mod resolver;

pub use kind::{ActionKind, ActionOutcome, ActionRequest, RejectReason};
pub use resolver::{decide, ActionResolver, Verdict};
