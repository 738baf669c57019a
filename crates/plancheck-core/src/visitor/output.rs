///
/// VisitOutput
///
/// Result a visitor synthesizes per node. The walk starts each node from its
/// hook's value and folds every child result in with `merge`, left to right.
///

pub trait VisitOutput: Sized {
    /// Contribution of a node whose hook has nothing to say.
    fn empty() -> Self;

    fn merge(self, next: Self) -> Self;
}

impl VisitOutput for () {
    fn empty() -> Self {}

    fn merge(self, (): Self) -> Self {}
}

impl VisitOutput for bool {
    fn empty() -> Self {
        false
    }

    fn merge(self, next: Self) -> Self {
        self || next
    }
}

impl VisitOutput for usize {
    fn empty() -> Self {
        0
    }

    fn merge(self, next: Self) -> Self {
        self.saturating_add(next)
    }
}

impl<T> VisitOutput for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }

    fn merge(mut self, mut next: Self) -> Self {
        self.append(&mut next);
        self
    }
}

/// First `Some` wins.
impl<T> VisitOutput for Option<T> {
    fn empty() -> Self {
        None
    }

    fn merge(self, next: Self) -> Self {
        self.or(next)
    }
}
