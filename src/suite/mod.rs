//! The ten test categories, one module each. Every runner is a pure function
//! of the probe context (and, where relevant, an injected collaborator port)
//! producing exactly one [`CategoryResult`](crate::report::CategoryResult);
//! probe order inside a category is fixed so reports stay reproducible.

pub mod api;
pub mod errors;
pub mod frontend;
pub mod health;
pub mod optimization;
pub mod performance;
pub mod prediction;
pub mod simulation;
pub mod synthetic;
pub mod validation;
