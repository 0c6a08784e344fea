use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tether_core::{
    Dispose, Invalidator, current_invalidator, disposable_effect, gated_effect, on_unmount,
    remember, scoped_effect,
};

/// Runs `effect` after the first commit; its cleanup runs on unmount.
pub fn use_effect_once(effect: impl FnOnce() -> Dispose + 'static) {
    disposable_effect((), effect);
}

pub fn use_mount(f: impl FnOnce() + 'static) {
    use_effect_once(move || {
        f();
        Dispose::none()
    });
}

/// Runs the `f` given on the most recent pass when the component unmounts.
pub fn use_unmount(f: impl FnOnce() + 'static) {
    let latest = remember(|| RefCell::new(None::<Box<dyn FnOnce()>>));
    let installed = remember(|| Cell::new(false));

    *latest.borrow_mut() = Some(Box::new(f));

    if !installed.get() {
        installed.set(true);
        scoped_effect(move || {
            on_unmount(move || {
                let f = latest.borrow_mut().take();
                if let Some(f) = f {
                    f();
                }
            })
        });
    }
}

/// True only during the first pass.
pub fn use_first_mount_state() -> bool {
    let first = remember(|| Cell::new(true));
    first.replace(false)
}

/// Like `disposable_effect`, but skips the first pass.
pub fn use_update_effect<K: PartialEq + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let first = use_first_mount_state();
    let last_key = remember(|| RefCell::new(None::<K>));

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);
    }
    gated_effect(changed && !first, effect);
}

/// Whether the owning component is mounted, readable from callbacks.
#[derive(Clone)]
pub struct IsMounted(Rc<Cell<bool>>);

impl IsMounted {
    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// False during the first pass, true once it committed, false after unmount.
pub fn use_is_mounted() -> IsMounted {
    let flag = remember(|| Rc::new(Cell::new(false)));
    let cell = (*flag).clone();
    use_effect_once(move || {
        cell.set(true);
        on_unmount(move || cell.set(false))
    });
    IsMounted((*flag).clone())
}

/// Forces another pass of the owning component.
#[derive(Clone)]
pub struct Rerender(Option<Invalidator>);

impl Rerender {
    pub fn request(&self) -> bool {
        match &self.0 {
            Some(inv) => inv.invalidate(),
            None => false,
        }
    }
}

pub fn use_rerender() -> Rerender {
    let inv = remember(current_invalidator);
    Rerender((*inv).clone())
}
