use crate::{Dispose, on_commit, on_unmount, remember, scoped_effect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct EffectSlot {
    cleanup: RefCell<Option<Dispose>>,
    installed: Cell<bool>,
}

impl EffectSlot {
    fn run_cleanup(&self) {
        let d = self.cleanup.borrow_mut().take();
        if let Some(d) = d {
            d.run();
        }
    }
}

/// One cleanup slot per call-site, with a single unmount disposer.
fn effect_slot() -> Rc<EffectSlot> {
    let slot = remember(|| EffectSlot {
        cleanup: RefCell::new(None),
        installed: Cell::new(false),
    });

    if !slot.installed.get() {
        slot.installed.set(true);
        let slot = slot.clone();
        scoped_effect(move || on_unmount(move || slot.run_cleanup()));
    }
    slot
}

/// Runs `effect` after commit when `fires` is true, cleaning up the previous
/// run first. The last cleanup runs on unmount.
///
/// The decision is the caller's; this only owns the cleanup discipline.
pub fn gated_effect(fires: bool, effect: impl FnOnce() -> Dispose + 'static) {
    let slot = effect_slot();
    if fires {
        on_commit(move || {
            slot.run_cleanup();
            let d = effect();
            *slot.cleanup.borrow_mut() = Some(d);
        });
    }
}

/// cleanup on key change or unmount
pub fn disposable_effect<K: PartialEq + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    // Slot-based. For branch-stability use `remember_with_key` variants.
    let last_key = remember(|| RefCell::new(None::<K>));

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);
    }
    gated_effect(changed, effect);
}

/// Internal implementation: keyed by a per-callsite id string.
pub fn launched_effect_internal<K: PartialEq + 'static>(
    callsite: &'static str,
    key: K,
    effect: impl FnOnce() + 'static,
) {
    // One slot per call-site, with K baked into its type.
    let last_key =
        crate::remember_with_key(format!("launched:{callsite}"), || RefCell::new(None::<K>));

    let mut last = last_key.borrow_mut();
    if last.as_ref() != Some(&key) {
        *last = Some(key);
        // not cancelled on unmount
        on_commit(effect);
    }
}

#[macro_export]
macro_rules! launched_effect {
    ($key:expr, $effect:expr) => {
        $crate::effects_ext::launched_effect_internal(
            concat!(module_path!(), ":", line!(), ":", column!()),
            $key,
            $effect,
        )
    };
}
