use crate::types::{DataType, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ScalarExpr
///
/// Minimal expression payload carried by operator kinds.
/// The IR reads it for symbol references and, where trivially known, its type;
/// evaluation semantics live elsewhere.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ScalarExpr {
    Symbol(Symbol),

    Literal { value: String, data_type: DataType },

    /// Opaque call; the return type is resolved by the function registry, not here.
    Call { name: String, args: Vec<Self> },
}

impl ScalarExpr {
    #[must_use]
    pub fn symbol(symbol: impl Into<Symbol>) -> Self {
        Self::Symbol(symbol.into())
    }

    #[must_use]
    pub fn literal(value: impl Into<String>, data_type: DataType) -> Self {
        Self::Literal {
            value: value.into(),
            data_type,
        }
    }

    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call {
            name: name.into(),
            args,
        }
    }

    /// Append every referenced symbol, left to right, duplicates included.
    pub fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a Symbol>) {
        match self {
            Self::Symbol(symbol) => out.push(symbol),
            Self::Literal { .. } => {}
            Self::Call { args, .. } => {
                for arg in args {
                    arg.collect_symbols(out);
                }
            }
        }
    }

    /// Type of the expression when it can be read without a function registry.
    #[must_use]
    pub fn known_type<'a>(
        &'a self,
        lookup: impl FnOnce(&Symbol) -> Option<&'a DataType>,
    ) -> Option<&'a DataType> {
        match self {
            Self::Symbol(symbol) => lookup(symbol),
            Self::Literal { data_type, .. } => Some(data_type),
            Self::Call { .. } => None,
        }
    }
}

impl fmt::Display for ScalarExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(symbol) => write!(f, "{symbol}"),
            Self::Literal { value, data_type } => write!(f, "{data_type} '{value}'"),
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_call_collects_symbols_in_order() {
        let expr = ScalarExpr::call(
            "and",
            vec![
                ScalarExpr::call(
                    "gt",
                    vec![
                        ScalarExpr::symbol("b"),
                        ScalarExpr::literal("1", DataType::BIGINT),
                    ],
                ),
                ScalarExpr::symbol("a"),
            ],
        );

        let mut symbols = Vec::new();
        expr.collect_symbols(&mut symbols);

        assert_eq!(symbols, vec![&Symbol::from("b"), &Symbol::from("a")]);
        assert_eq!(expr.to_string(), "and(gt(b, bigint '1'), a)");
    }

    #[test]
    fn call_type_is_unknown() {
        let expr = ScalarExpr::call("now", Vec::new());

        assert_eq!(expr.known_type(|_| None), None);
    }
}
