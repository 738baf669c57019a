use crate::sanity::{
    Checker,
    checks::{
        ChildArity, DeclaredSymbols, Dependencies, NoDuplicatePlanNodeIds, SingleOutput,
        TypeConsistency,
    },
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// SanityConfigError
///

#[derive(Debug, ThisError)]
pub enum SanityConfigError {
    #[error("checker '{0}' is listed more than once")]
    DuplicateChecker(&'static str),

    #[error("invalid sanity config: {0}")]
    Parse(#[from] serde_json::Error),
}

///
/// BuiltinChecker
/// Configuration name for each checker shipped with this crate.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinChecker {
    NoDuplicateIds,
    ChildArity,
    DeclaredSymbols,
    Dependencies,
    TypeConsistency,
    SingleOutput,
}

impl BuiltinChecker {
    /// Default registration order: cheap structural rules first.
    pub const DEFAULT_ORDER: [Self; 6] = [
        Self::NoDuplicateIds,
        Self::ChildArity,
        Self::DeclaredSymbols,
        Self::Dependencies,
        Self::TypeConsistency,
        Self::SingleOutput,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoDuplicateIds => NoDuplicatePlanNodeIds::NAME,
            Self::ChildArity => ChildArity::NAME,
            Self::DeclaredSymbols => DeclaredSymbols::NAME,
            Self::Dependencies => Dependencies::NAME,
            Self::TypeConsistency => TypeConsistency::NAME,
            Self::SingleOutput => SingleOutput::NAME,
        }
    }

    #[must_use]
    pub fn instantiate(self) -> Box<dyn Checker> {
        match self {
            Self::NoDuplicateIds => Box::new(NoDuplicatePlanNodeIds),
            Self::ChildArity => Box::new(ChildArity),
            Self::DeclaredSymbols => Box::new(DeclaredSymbols),
            Self::Dependencies => Box::new(Dependencies),
            Self::TypeConsistency => Box::new(TypeConsistency),
            Self::SingleOutput => Box::new(SingleOutput),
        }
    }
}

/// Every built-in checker, in default order.
#[must_use]
pub fn default_checkers() -> Vec<Box<dyn Checker>> {
    BuiltinChecker::DEFAULT_ORDER
        .into_iter()
        .map(BuiltinChecker::instantiate)
        .collect()
}

///
/// SanityConfig
///
/// Which built-in checkers run, and in what order. An empty list is valid
/// and accepts every plan.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanityConfig {
    pub checkers: Vec<BuiltinChecker>,
}

impl SanityConfig {
    #[must_use]
    pub const fn new(checkers: Vec<BuiltinChecker>) -> Self {
        Self { checkers }
    }

    /// Parse and validate a JSON document such as
    /// `{"checkers": ["no_duplicate_ids", "child_arity"]}`.
    pub fn from_json(json: &str) -> Result<Self, SanityConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SanityConfigError> {
        let mut seen = BTreeSet::new();
        for checker in &self.checkers {
            if !seen.insert(*checker) {
                return Err(SanityConfigError::DuplicateChecker(checker.name()));
            }
        }

        Ok(())
    }
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self::new(BuiltinChecker::DEFAULT_ORDER.to_vec())
    }
}
