use std::cmp::Ordering;
use std::rc::Rc;

use tether_core::{State, remember, use_state};

/// Handle returned by [`use_list`].
pub struct ListHandle<T: 'static> {
    state: State<Vec<T>>,
    initial: Rc<Vec<T>>,
}

impl<T> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            initial: self.initial.clone(),
        }
    }
}

impl<T: Clone + 'static> ListHandle<T> {
    pub fn get(&self) -> Vec<T> {
        self.state.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.state.with(|v| f(v))
    }

    pub fn len(&self) -> usize {
        self.state.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set(&self, items: Vec<T>) {
        self.state.set(items);
    }

    pub fn push(&self, item: T) {
        self.state.update(|v| v.push(item));
    }

    /// Inserts before `index`; past the end appends.
    pub fn insert_at(&self, index: usize, item: T) {
        self.state.update(|v| {
            let index = index.min(v.len());
            v.insert(index, item);
        });
    }

    /// Replaces the item at `index`. Out of range is a no-op.
    pub fn update_at(&self, index: usize, item: T) -> bool {
        self.state.update_if(|v| match v.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        })
    }

    pub fn remove_at(&self, index: usize) -> Option<T> {
        let mut removed = None;
        self.state.update_if(|v| {
            if index < v.len() {
                removed = Some(v.remove(index));
            }
            removed.is_some()
        });
        removed
    }

    /// Replaces every item matching `pred` with `item`. Returns how many.
    pub fn update_where(&self, pred: impl Fn(&T) -> bool, item: T) -> usize {
        let mut count = 0;
        self.state.update_if(|v| {
            for slot in v.iter_mut().filter(|x| pred(x)) {
                *slot = item.clone();
                count += 1;
            }
            count > 0
        });
        count
    }

    pub fn update_first(&self, pred: impl Fn(&T) -> bool, item: T) -> bool {
        self.state.update_if(|v| match v.iter_mut().find(|x| pred(x)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        })
    }

    /// Like `update_first`, but appends `item` when nothing matches.
    pub fn upsert(&self, pred: impl Fn(&T) -> bool, item: T) {
        self.state.update(|v| match v.iter_mut().find(|x| pred(x)) {
            Some(slot) => *slot = item,
            None => v.push(item),
        });
    }

    pub fn filter(&self, keep: impl Fn(&T) -> bool) {
        self.state.update_if(|v| {
            let before = v.len();
            v.retain(|x| keep(x));
            v.len() != before
        });
    }

    pub fn sort_by(&self, cmp: impl FnMut(&T, &T) -> Ordering) {
        self.state.update(|v| v.sort_by(cmp));
    }

    pub fn clear(&self) {
        self.state.update_if(|v| {
            let had = !v.is_empty();
            v.clear();
            had
        });
    }

    /// Back to the list given on the first pass.
    pub fn reset(&self) {
        self.state.set((*self.initial).clone());
    }
}

pub fn use_list<T: Clone + 'static>(initial: Vec<T>) -> ListHandle<T> {
    let initial = remember(move || initial);
    let state = use_state(|| (*initial).clone());
    ListHandle { state, initial }
}
