//! ## Crate layout
//! - `core`: plan IR, traversal framework, sanity checkers, and observability.
//! - `connector`: connector metadata surface and the single-table adapter.
//!
//! The `prelude` module covers what a planner stage needs to build a plan
//! and run it through the sanity checkers.

pub use plancheck_connector as connector;
pub use plancheck_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::error::Error;

///
/// Planner Prelude
///

pub mod prelude {
    pub use crate::connector::{ConnectorMetadata, SchemaTableName, SingleTableConnector};
    pub use crate::core::{
        plan::{Assignment, EquiJoinClause, JoinType, PlanBuilder, PlanNodeIdAllocator},
        prelude::*,
        sanity::{PlanViolation, SanityConfig},
        types::SymbolAllocator,
    };
}
