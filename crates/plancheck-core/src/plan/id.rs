use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// PlanNodeId
///
/// Identity of one node. Must be unique within a plan: statistics, symbol
/// caches, and fragment stitching all key their maps by it.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlanNodeId(String);

impl PlanNodeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlanNodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for PlanNodeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

///
/// PlanNodeIdAllocator
/// Sequential id source owned by whoever builds one plan.
///

#[derive(Debug, Default)]
pub struct PlanNodeIdAllocator {
    next: u64,
}

impl PlanNodeIdAllocator {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> PlanNodeId {
        let id = PlanNodeId::from(self.next);
        self.next = self.next.saturating_add(1);

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_counts_from_zero() {
        let mut ids = PlanNodeIdAllocator::new();

        assert_eq!(ids.next_id(), PlanNodeId::from("0"));
        assert_eq!(ids.next_id(), PlanNodeId::from("1"));
        assert_eq!(ids.next_id().as_str(), "2");
    }

    #[test]
    fn integer_and_string_ids_agree() {
        assert_eq!(PlanNodeId::from(7_u64), PlanNodeId::new("7"));
    }
}
