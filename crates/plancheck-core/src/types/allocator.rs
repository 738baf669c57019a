use crate::types::{DataType, Symbol, TypeEnvironment};
use std::collections::BTreeMap;

///
/// SymbolAllocator
///
/// Planner-side source of fresh symbols. Every symbol it hands out is unique
/// within the allocator and has its type recorded, so the finished
/// environment covers everything the planner minted.
///

#[derive(Debug, Default)]
pub struct SymbolAllocator {
    types: BTreeMap<Symbol, DataType>,
    next_suffix: u64,
}

impl SymbolAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a symbol named after `hint`, suffixed `_N` when the name is taken.
    pub fn new_symbol(&mut self, hint: &str, data_type: DataType) -> Symbol {
        let hint = hint.trim().to_ascii_lowercase();
        let hint = if hint.is_empty() { "expr".to_string() } else { hint };

        let mut symbol = Symbol::new(hint.clone());
        while self.types.contains_key(&symbol) {
            symbol = Symbol::new(format!("{hint}_{}", self.next_suffix));
            self.next_suffix = self.next_suffix.saturating_add(1);
        }

        self.types.insert(symbol.clone(), data_type);
        symbol
    }

    #[must_use]
    pub fn type_of(&self, symbol: &Symbol) -> Option<&DataType> {
        self.types.get(symbol)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Freeze everything allocated so far into the plan's environment.
    #[must_use]
    pub fn types(&self) -> TypeEnvironment {
        self.types
            .iter()
            .map(|(symbol, data_type)| (symbol.clone(), data_type.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_hints_get_distinct_suffixes() {
        let mut symbols = SymbolAllocator::new();

        let a = symbols.new_symbol("Price", DataType::DOUBLE);
        let b = symbols.new_symbol("price", DataType::DOUBLE);
        let c = symbols.new_symbol("price", DataType::BIGINT);

        assert_eq!(a.name(), "price");
        assert_eq!(b.name(), "price_0");
        assert_eq!(c.name(), "price_1");
        assert_eq!(symbols.type_of(&c), Some(&DataType::BIGINT));
    }

    #[test]
    fn blank_hint_falls_back_to_expr() {
        let mut symbols = SymbolAllocator::new();

        assert_eq!(symbols.new_symbol("  ", DataType::BOOLEAN).name(), "expr");
    }

    #[test]
    fn environment_holds_every_allocated_symbol() {
        let mut symbols = SymbolAllocator::new();
        let a = symbols.new_symbol("a", DataType::BIGINT);
        let b = symbols.new_symbol("a", DataType::VARCHAR);

        let env = symbols.types();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get(&a), Some(&DataType::BIGINT));
        assert_eq!(env.get(&b), Some(&DataType::VARCHAR));
    }
}
