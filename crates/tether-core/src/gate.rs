use crate::{Comparator, Value, deep_equal};

/// Decides whether a side effect should (re)run for a dependency value.
///
/// Holds the snapshot of the last dependency value it fired for. Passing
/// `None` means "no dependencies given" and always fires. For `Value` deps an
/// `Absent` root counts as no dependencies too.
///
/// ```rust
/// use tether_core::*;
///
/// let mut gate: ChangeGate = ChangeGate::new();
/// assert!(gate.evaluate(Some(deps![1, 2])));
/// assert!(!gate.evaluate(Some(deps![1, 2])));
/// assert!(gate.evaluate(Some(deps![1, 3])));
/// assert_eq!(gate.generation(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ChangeGate<T = Value> {
    snapshot: Option<T>,
    generation: u64,
}

impl<T> Default for ChangeGate<T> {
    fn default() -> Self {
        Self {
            snapshot: None,
            generation: 0,
        }
    }
}

impl<T> ChangeGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of the last firing; `None` before the first one and after a
    /// firing without dependencies.
    pub fn snapshot(&self) -> Option<&T> {
        self.snapshot.as_ref()
    }

    /// Number of firings so far (wrapping).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fires when `deps` is `None`, when nothing was recorded yet, or when
    /// `same(snapshot, deps)` is false. Firing replaces the snapshot.
    pub fn evaluate_by(&mut self, deps: Option<T>, same: impl FnOnce(&T, &T) -> bool) -> bool {
        let unchanged = match (&self.snapshot, &deps) {
            (Some(prev), Some(cur)) => same(prev, cur),
            _ => false,
        };
        if unchanged {
            return false;
        }
        self.snapshot = deps;
        self.generation = self.generation.wrapping_add(1);
        true
    }
}

impl ChangeGate<Value> {
    pub fn evaluate(&mut self, deps: Option<Value>) -> bool {
        self.evaluate_by(given(deps), deep_equal)
    }

    pub fn evaluate_with(&mut self, cmp: &Comparator, deps: Option<Value>) -> bool {
        self.evaluate_by(given(deps), |a, b| cmp.equal(a, b))
    }
}

// `Some(Absent)` is how a null dependency arrives; it means "none given".
fn given(deps: Option<Value>) -> Option<Value> {
    deps.filter(|d| !d.is_absent())
}
