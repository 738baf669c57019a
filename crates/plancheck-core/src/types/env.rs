use crate::types::{DataType, Symbol};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};
use std::{
    collections::{BTreeMap, btree_map},
    fmt,
};
use thiserror::Error as ThisError;

///
/// TypeEnvironmentError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TypeEnvironmentError {
    #[error("symbol '{symbol}' declared as {existing} and again as {conflicting}")]
    ConflictingType {
        symbol: Symbol,
        existing: DataType,
        conflicting: DataType,
    },
}

///
/// TypeEnvironment
///
/// Symbol → type map bound to exactly one plan.
/// There is no mutation API; a finished environment only changes by being rebuilt.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeEnvironment {
    types: BTreeMap<Symbol, DataType>,
}

impl TypeEnvironment {
    #[must_use]
    pub fn builder() -> TypeEnvironmentBuilder {
        TypeEnvironmentBuilder::default()
    }

    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&DataType> {
        self.types.get(symbol)
    }

    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.types.contains_key(symbol)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Symbol, DataType> {
        self.types.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.types.keys()
    }
}

impl FromIterator<(Symbol, DataType)> for TypeEnvironment {
    /// Later entries win; use [`TypeEnvironment::builder`] to reject conflicts.
    fn from_iter<I: IntoIterator<Item = (Symbol, DataType)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TypeEnvironment {
    type Item = (&'a Symbol, &'a DataType);
    type IntoIter = btree_map::Iter<'a, Symbol, DataType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

// Deserialization goes through the builder so a JSON object repeating a
// symbol with another type is rejected, not resolved last-wins.
impl<'de> Deserialize<'de> for TypeEnvironment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DeclarationVisitor;

        impl<'de> Visitor<'de> for DeclarationVisitor {
            type Value = TypeEnvironment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of symbol names to type signatures")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut builder = TypeEnvironment::builder();
                while let Some((symbol, data_type)) = map.next_entry::<Symbol, DataType>()? {
                    builder
                        .declare(symbol, data_type)
                        .map_err(de::Error::custom)?;
                }

                Ok(builder.build())
            }
        }

        deserializer.deserialize_map(DeclarationVisitor)
    }
}

///
/// TypeEnvironmentBuilder
///
/// Collects declarations and rejects a symbol redeclared with another type.
///

#[derive(Debug, Default)]
pub struct TypeEnvironmentBuilder {
    types: BTreeMap<Symbol, DataType>,
}

impl TypeEnvironmentBuilder {
    /// Declare one symbol. Repeating an identical declaration is a no-op.
    pub fn declare(
        &mut self,
        symbol: impl Into<Symbol>,
        data_type: DataType,
    ) -> Result<&mut Self, TypeEnvironmentError> {
        let symbol = symbol.into();

        match self.types.entry(symbol) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(data_type);
            }
            btree_map::Entry::Occupied(slot) => {
                if *slot.get() != data_type {
                    return Err(TypeEnvironmentError::ConflictingType {
                        symbol: slot.key().clone(),
                        existing: slot.get().clone(),
                        conflicting: data_type,
                    });
                }
            }
        }

        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> TypeEnvironment {
        TypeEnvironment { types: self.types }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accepts_identical_redeclaration() {
        let mut builder = TypeEnvironment::builder();
        builder
            .declare("a", DataType::BIGINT)
            .unwrap()
            .declare("a", DataType::BIGINT)
            .unwrap();

        let env = builder.build();
        assert_eq!(env.len(), 1);
        assert_eq!(env.get(&Symbol::from("a")), Some(&DataType::BIGINT));
    }

    #[test]
    fn builder_rejects_conflicting_redeclaration() {
        let mut builder = TypeEnvironment::builder();
        builder.declare("a", DataType::BIGINT).unwrap();

        let err = builder.declare("a", DataType::VARCHAR).unwrap_err();
        assert_eq!(
            err,
            TypeEnvironmentError::ConflictingType {
                symbol: Symbol::from("a"),
                existing: DataType::BIGINT,
                conflicting: DataType::VARCHAR,
            }
        );
    }

    #[test]
    fn from_iter_keeps_last_declaration() {
        let env: TypeEnvironment = [
            (Symbol::from("a"), DataType::BIGINT),
            (Symbol::from("a"), DataType::DOUBLE),
        ]
        .into_iter()
        .collect();

        assert_eq!(env.get(&Symbol::from("a")), Some(&DataType::DOUBLE));
    }

    #[test]
    fn json_environment_round_trips() {
        let env: TypeEnvironment = [
            (Symbol::from("a"), DataType::BIGINT),
            (Symbol::from("b"), DataType::new("decimal(10,2)")),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"a":"bigint","b":"decimal(10,2)"}"#);

        let back: TypeEnvironment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }

    #[test]
    fn json_accepts_identical_repeated_symbol() {
        let env: TypeEnvironment = serde_json::from_str(r#"{"a":"bigint","a":"bigint"}"#).unwrap();

        assert_eq!(env.len(), 1);
    }

    #[test]
    fn json_rejects_conflicting_repeated_symbol() {
        let err = serde_json::from_str::<TypeEnvironment>(r#"{"a":"bigint","a":"varchar"}"#)
            .unwrap_err();

        assert!(
            err.to_string()
                .contains("symbol 'a' declared as bigint and again as varchar")
        );
    }
}
