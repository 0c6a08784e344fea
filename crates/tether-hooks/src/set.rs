use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use tether_core::{State, remember, use_state};

pub struct SetHandle<T: 'static> {
    state: State<HashSet<T>>,
    initial: Rc<HashSet<T>>,
}

impl<T> Clone for SetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            initial: self.initial.clone(),
        }
    }
}

impl<T: Eq + Hash + Clone + 'static> SetHandle<T> {
    pub fn has(&self, item: &T) -> bool {
        self.state.with(|s| s.contains(item))
    }

    pub fn len(&self) -> usize {
        self.state.with(HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> HashSet<T> {
        self.state.get()
    }

    /// Returns false (and does not re-render) if `item` was already present.
    pub fn add(&self, item: T) -> bool {
        self.state.update_if(|s| s.insert(item))
    }

    pub fn remove(&self, item: &T) -> bool {
        self.state.update_if(|s| s.remove(item))
    }

    /// Adds `item` if missing, removes it otherwise. Returns whether it is
    /// now present.
    pub fn toggle(&self, item: T) -> bool {
        self.state.update(|s| {
            if s.remove(&item) {
                false
            } else {
                s.insert(item);
                true
            }
        })
    }

    pub fn clear(&self) {
        self.state.update_if(|s| {
            let had = !s.is_empty();
            s.clear();
            had
        });
    }

    pub fn reset(&self) {
        self.state.set((*self.initial).clone());
    }
}

pub fn use_set<T: Eq + Hash + Clone + 'static>(initial: HashSet<T>) -> SetHandle<T> {
    let initial = remember(move || initial);
    let state = use_state(|| (*initial).clone());
    SetHandle { state, initial }
}
