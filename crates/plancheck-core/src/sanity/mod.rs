//! Plan sanity checking.
//!
//! A plan reaches downstream stages only as a `ValidatedPlan`, which only
//! `SanityChecker::check` can produce. Checkers are read-only; the
//! orchestrator alone records metrics and logs.

pub mod checks;

mod checker;
mod config;
mod context;
mod orchestrator;
mod validated;
mod violation;


// re-exports
pub use checker::Checker;
pub use config::{BuiltinChecker, SanityConfig, SanityConfigError, default_checkers};
pub use context::CompilationContext;
pub use orchestrator::SanityChecker;
pub use validated::ValidatedPlan;
pub use violation::{PlanViolation, ViolationClass, ViolationDetail};
