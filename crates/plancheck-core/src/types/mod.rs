//! Symbols, type tags, and the per-plan type environment.
//!
//! Nothing in this module interprets a type; tags are compared for equality only.

mod allocator;
mod data_type;
mod env;
mod symbol;

// re-exports
pub use allocator::SymbolAllocator;
pub use data_type::DataType;
pub use env::{TypeEnvironment, TypeEnvironmentBuilder, TypeEnvironmentError};
pub use symbol::Symbol;
