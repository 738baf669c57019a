use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

///
/// Domain
/// Discrete set of values one column may take, optionally including null.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Domain {
    pub values: BTreeSet<String>,
    pub null_allowed: bool,
}

impl Domain {
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self::only([value.into()])
    }

    #[must_use]
    pub fn only(values: impl IntoIterator<Item = String>) -> Self {
        Self {
            values: values.into_iter().collect(),
            null_allowed: false,
        }
    }

    #[must_use]
    pub fn only_null() -> Self {
        Self {
            values: BTreeSet::new(),
            null_allowed: true,
        }
    }

    /// True when no value, not even null, satisfies the domain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && !self.null_allowed
    }

    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            values: self.values.intersection(&other.values).cloned().collect(),
            null_allowed: self.null_allowed && other.null_allowed,
        }
    }
}

///
/// TupleDomain
///
/// Conjunction of per-column domains, keyed by column name. `All` places no
/// restriction; `None` is unsatisfiable.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum TupleDomain {
    #[default]
    All,
    None,
    Columns(BTreeMap<String, Domain>),
}

impl TupleDomain {
    /// Build from column domains; an empty domain makes the whole tuple `None`.
    #[must_use]
    pub fn with_columns(columns: BTreeMap<String, Domain>) -> Self {
        if columns.is_empty() {
            Self::All
        } else if columns.values().any(Domain::is_empty) {
            Self::None
        } else {
            Self::Columns(columns)
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn domain(&self, column: &str) -> Option<&Domain> {
        match self {
            Self::Columns(columns) => columns.get(column),
            Self::All | Self::None => None,
        }
    }

    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::None, _) | (_, Self::None) => Self::None,
            (Self::All, other) | (other, Self::All) => other.clone(),
            (Self::Columns(left), Self::Columns(right)) => {
                let mut merged = left.clone();
                for (column, domain) in right {
                    merged
                        .entry(column.clone())
                        .and_modify(|existing| *existing = existing.intersect(domain))
                        .or_insert_with(|| domain.clone());
                }

                Self::with_columns(merged)
            }
        }
    }
}

///
/// Constraint
/// Predicate summary the planner offers a connector when choosing layouts.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Constraint {
    summary: TupleDomain,
}

impl Constraint {
    #[must_use]
    pub const fn new(summary: TupleDomain) -> Self {
        Self { summary }
    }

    #[must_use]
    pub fn always_true() -> Self {
        Self::new(TupleDomain::All)
    }

    #[must_use]
    pub const fn summary(&self) -> &TupleDomain {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(entries: &[(&str, Domain)]) -> BTreeMap<String, Domain> {
        entries
            .iter()
            .map(|(name, domain)| ((*name).to_string(), domain.clone()))
            .collect()
    }

    #[test]
    fn empty_column_domain_collapses_to_none() {
        let tuple = TupleDomain::with_columns(columns(&[("value", Domain::only(Vec::new()))]));

        assert!(tuple.is_none());
        assert!(TupleDomain::with_columns(BTreeMap::new()).is_all());
    }

    #[test]
    fn intersect_narrows_shared_columns() {
        let left = TupleDomain::with_columns(columns(&[(
            "value",
            Domain::only(["1".to_string(), "2".to_string()]),
        )]));
        let right = TupleDomain::with_columns(columns(&[
            ("value", Domain::only(["2".to_string(), "3".to_string()])),
            ("name", Domain::only_null()),
        ]));

        let both = left.intersect(&right);

        assert_eq!(both.domain("value"), Some(&Domain::single("2")));
        assert_eq!(both.domain("name"), Some(&Domain::only_null()));
        assert_eq!(left.intersect(&TupleDomain::All), left);
        assert!(left.intersect(&TupleDomain::None).is_none());
    }

    #[test]
    fn disjoint_values_are_unsatisfiable() {
        let left = TupleDomain::with_columns(columns(&[("value", Domain::single("1"))]));
        let right = TupleDomain::with_columns(columns(&[("value", Domain::single("9"))]));

        assert!(left.intersect(&right).is_none());
    }
}
