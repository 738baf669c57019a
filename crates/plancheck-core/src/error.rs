use crate::{
    plan::PlanError,
    sanity::{PlanViolation, SanityConfigError, ViolationClass},
    types::TypeEnvironmentError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Every failure this crate reports. All of them are compile-time failures
/// for the plan at hand; none is retried or downgraded.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    TypeEnvironment(#[from] TypeEnvironmentError),

    #[error(transparent)]
    Violation(#[from] PlanViolation),

    #[error(transparent)]
    Config(#[from] SanityConfigError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Plan(_) | Self::TypeEnvironment(_) => ErrorClass::Construction,
            Self::Violation(v) => match v.class {
                ViolationClass::Structural => ErrorClass::Structural,
                ViolationClass::Semantic => ErrorClass::Semantic,
            },
            Self::Config(_) => ErrorClass::Configuration,
        }
    }

    /// The violation, when the plan was rejected by a checker.
    #[must_use]
    pub const fn violation(&self) -> Option<&PlanViolation> {
        match self {
            Self::Violation(v) => Some(v),
            _ => None,
        }
    }
}

///
/// ErrorClass
/// Coarse category for callers that branch on failure kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Construction,
    Structural,
    Semantic,
    Configuration,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Construction => "construction",
            Self::Structural => "structural",
            Self::Semantic => "semantic",
            Self::Configuration => "configuration",
        };
        write!(f, "{label}")
    }
}
