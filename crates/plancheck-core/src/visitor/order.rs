use crate::plan::PlanNode;

///
/// PreOrder
///
/// Iterator over a node tree in walk order: parent first, then children
/// left to right. Uses an explicit stack, so deep trees do not recurse.
///

#[derive(Clone, Debug)]
pub struct PreOrder<'p> {
    stack: Vec<&'p PlanNode>,
}

impl<'p> PreOrder<'p> {
    #[must_use]
    pub fn new(root: &'p PlanNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'p> Iterator for PreOrder<'p> {
    type Item = &'p PlanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.sources().iter().rev());

        Some(node)
    }
}
