//! Built-in checkers. Each one is a stateless visitor over the plan tree and
//! reports only the first violation it finds.

mod child_arity;
mod declared_symbols;
mod dependencies;
mod node_ids;
mod single_output;
mod type_consistency;


// re-exports
pub use child_arity::ChildArity;
pub use declared_symbols::DeclaredSymbols;
pub use dependencies::Dependencies;
pub use node_ids::NoDuplicatePlanNodeIds;
pub use single_output::SingleOutput;
pub use type_consistency::TypeConsistency;
