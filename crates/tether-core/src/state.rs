use crate::{Signal, current_invalidator, remember};

/// Component state: a remembered [`Signal`] whose writes schedule another
/// pass of the component that owns it.
pub struct State<T: 'static> {
    inner: Signal<T>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> State<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    pub fn set(&self, v: T) {
        self.inner.set(v)
    }

    /// Sets `v` unless it equals the current value.
    pub fn set_if_changed(&self, v: T) -> bool
    where
        T: PartialEq,
    {
        self.inner.update_if(|cur| {
            if *cur == v {
                return false;
            }
            *cur = v;
            true
        })
    }

    pub fn replace(&self, v: T) -> T {
        self.inner.replace(v)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.inner.update(f)
    }

    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.inner.update_if(f)
    }

    pub fn signal(&self) -> &Signal<T> {
        &self.inner
    }
}

/// Remembers a signal and wires it to the current component's invalidator.
pub fn use_state<T: 'static>(init: impl FnOnce() -> T) -> State<T> {
    let inner = remember(|| {
        let sig = Signal::new(init());
        match current_invalidator() {
            Some(inv) => {
                sig.subscribe(move |_| {
                    inv.invalidate();
                });
            }
            None => log::warn!("use_state: no current component; writes will not re-render"),
        }
        sig
    });
    State {
        inner: (*inner).clone(),
    }
}
