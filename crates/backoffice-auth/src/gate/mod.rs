//! Route-authorization state machine.
//!
//! [`AuthGate`] classifies the current path into an [`AuthDecision`] and
//! lists the [`GateEffect`]s the host must perform. It performs no I/O.

pub mod decision;
pub mod machine;
pub mod redirect_guard;
pub mod resolver;

pub use decision::{AuthDecision, Evaluation, GateEffect, SignOutReason};
pub use machine::{AuthGate, SessionContext};
pub use redirect_guard::RedirectGuard;
pub use resolver::RedirectResolver;
