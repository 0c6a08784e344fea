use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Shared cell that notifies subscribers after every write.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: Vec<Rc<dyn Fn(&T)>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn replace(&self, v: T) -> T {
        let old = std::mem::replace(&mut self.0.borrow_mut().value, v);
        self.notify();
        old
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let r = f(&mut self.0.borrow_mut().value);
        self.notify();
        r
    }

    /// Like `update`, but only notifies when `f` returns true.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = f(&mut self.0.borrow_mut().value);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Rc::new(f));
        inner.subs.len() - 1
    }

    // Subscribers see the value through a shared borrow, so they may read
    // the signal but not write it.
    fn notify(&self) {
        let subs = self.0.borrow().subs.clone();
        let inner = self.0.borrow();
        for s in &subs {
            s(&inner.value);
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
