pub use crate::compare::{Comparator, deep_equal};
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::effects_ext::{disposable_effect, gated_effect};
pub use crate::gate::ChangeGate;
pub use crate::runtime::{
    Component, ComponentKey, Invalidator, Lifecycle, Scheduler, SchedulerConfig,
    current_component, current_invalidator, on_commit, remember, remember_state,
    remember_state_with_key, remember_with_key,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::signal::{Signal, signal};
pub use crate::state::{State, use_state};
pub use crate::value::Value;
