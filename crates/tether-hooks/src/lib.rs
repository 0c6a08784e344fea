//! # Hooks
//!
//! Small state containers for Tether components. Each hook owns one piece of
//! state in the calling component's slots and hands back a cheap, cloneable
//! handle; writes through the handle schedule another pass.
//!
//! ```rust
//! use tether_core::*;
//! use tether_hooks::*;
//!
//! let mut sched = Scheduler::new();
//! let key = sched.mount(|| {
//!     let clicks = use_counter_with(0, CounterOptions::between(0, 3));
//!     let open = use_toggle(false);
//!     let renders = use_render_count();
//!
//!     if renders == 1 {
//!         clicks.inc(10);
//!         open.toggle();
//!     }
//! });
//!
//! sched.flush();
//! assert_eq!(sched.component(key).map(|c| c.renders()), Some(2));
//! ```
//!
//! Like every slot-based hook, call them unconditionally and in the same
//! order on every pass.
//!
//! | hook | state |
//! |---|---|
//! | `use_counter`, `use_counter_with` | clamped integer |
//! | `use_toggle` | boolean |
//! | `use_list`, `use_map`, `use_set` | collections |
//! | `use_storage`, `use_local_storage`, `use_session_storage` | JSON in a key-value store |
//! | `use_previous`, `use_previous_distinct`, `use_latest` | earlier / latest values |
//! | `use_mount`, `use_unmount`, `use_effect_once`, `use_update_effect`, `use_first_mount_state`, `use_is_mounted`, `use_rerender` | lifecycle |
//! | `use_render_count` | pass counter |
//! | `use_deep_compare_effect`, `use_custom_compare_effect` | effects gated on structural change |

pub mod counter;
pub mod deep_effect;
pub mod error;
pub mod lifecycle;
pub mod list;
pub mod map;
pub mod previous;
pub mod render_count;
pub mod set;
pub mod storage;
pub mod tests;
pub mod toggle;

pub use counter::*;
pub use deep_effect::*;
pub use error::*;
pub use lifecycle::*;
pub use list::*;
pub use map::*;
pub use previous::*;
pub use render_count::*;
pub use set::*;
pub use storage::*;
pub use toggle::*;
