use std::cell::RefCell;

use tether_core::{ChangeGate, Comparator, Dispose, Value, gated_effect, remember};

struct DeepGate {
    gate: ChangeGate<Value>,
    checked: bool,
}

// Only composites need a structural comparison.
fn check_deps(deps: Option<&Value>) {
    match deps {
        Some(Value::List(items)) if items.is_empty() => log::warn!(
            "use_deep_compare_effect: empty dependency list; use use_effect_once instead"
        ),
        Some(Value::List(items)) if !items.iter().any(Value::is_composite) => log::warn!(
            "use_deep_compare_effect: all dependencies are primitive; disposable_effect is enough"
        ),
        _ => {}
    }
}

/// Runs `effect` after commit whenever `deps` is structurally different
/// from the last run's. `None` runs it after every pass.
///
/// ```rust
/// use tether_core::*;
/// use tether_hooks::use_deep_compare_effect;
///
/// fn search(filters: Value) {
///     use_deep_compare_effect(Some(deps![filters]), || {
///         log::info!("refetch");
///         Dispose::none()
///     });
/// }
/// ```
pub fn use_deep_compare_effect(deps: Option<Value>, effect: impl FnOnce() -> Dispose + 'static) {
    use_deep_compare_effect_with(&Comparator::default(), deps, effect)
}

pub fn use_deep_compare_effect_with(
    cmp: &Comparator,
    deps: Option<Value>,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let slot = remember(|| {
        RefCell::new(DeepGate {
            gate: ChangeGate::new(),
            checked: false,
        })
    });

    let fires = {
        let mut g = slot.borrow_mut();
        if cfg!(debug_assertions) && !g.checked {
            g.checked = true;
            check_deps(deps.as_ref());
        }
        let fires = g.gate.evaluate_with(cmp, deps);
        if fires {
            log::trace!("deep compare effect: generation {}", g.gate.generation());
        }
        fires
    };
    gated_effect(fires, effect);
}

/// Like [`use_deep_compare_effect`] with a caller-supplied `same`.
pub fn use_custom_compare_effect<T: 'static>(
    deps: Option<T>,
    same: impl FnOnce(&T, &T) -> bool,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let gate = remember(|| RefCell::new(ChangeGate::<T>::new()));
    let fires = gate.borrow_mut().evaluate_by(deps, same);
    gated_effect(fires, effect);
}
