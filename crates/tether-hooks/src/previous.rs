use std::cell::RefCell;
use std::rc::Rc;

use tether_core::{on_commit, remember};

/// The value passed on the previous pass; `None` on the first.
pub fn use_previous<T: Clone + 'static>(value: T) -> Option<T> {
    let slot = remember(|| RefCell::new(None::<T>));
    let prev = slot.borrow().clone();
    on_commit(move || *slot.borrow_mut() = Some(value));
    prev
}

struct Distinct<T> {
    prev: Option<T>,
    cur: Option<T>,
}

/// The last *different* value seen before the current one. Values for which
/// `same(current, value)` holds do not advance it.
pub fn use_previous_distinct<T: Clone + 'static>(
    value: T,
    same: impl FnOnce(&T, &T) -> bool,
) -> Option<T> {
    let slot = remember(|| {
        RefCell::new(Distinct::<T> {
            prev: None,
            cur: None,
        })
    });

    let mut d = slot.borrow_mut();
    let changed = match &d.cur {
        Some(cur) => !same(cur, &value),
        None => true,
    };
    if changed {
        d.prev = d.cur.replace(value);
    }
    d.prev.clone()
}

/// A cell that always holds the value from the latest pass. Useful for
/// callbacks that outlive the pass they were created in.
pub fn use_latest<T: Clone + 'static>(value: T) -> Rc<RefCell<T>> {
    let cell = remember(|| RefCell::new(value.clone()));
    *cell.borrow_mut() = value;
    cell
}
