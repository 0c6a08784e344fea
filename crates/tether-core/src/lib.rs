//! # Components, slots, and effects
//!
//! Tether runs component bodies as plain functions. State that has to survive
//! from one pass to the next lives in *slots* owned by the component, and side
//! effects are queued until the pass commits. There are four pieces:
//!
//! - `Component`: slot table, cleanup scope, lifecycle flags.
//! - `remember*` / `use_state`: storage bound to the current component.
//! - `on_commit` / `effect` / `disposable_effect`: work that runs after a pass.
//! - `ChangeGate` + `deep_equal`: "did these dependencies really change?"
//!
//! ## Passes
//!
//! ```rust
//! use tether_core::*;
//!
//! let c = Component::new();
//! let body = || {
//!     let count = use_state(|| 0);
//!     count.get()
//! };
//!
//! assert_eq!(c.render(body), 0);
//! assert!(c.is_mounted());
//! ```
//!
//! Writes through a `State` mark the owning component dirty. A `Scheduler`
//! owns mounted components and re-renders the dirty ones on `flush()`.
//!
//! - `remember` and `use_state` are order‑based: the Nth call in a pass always
//!   refers to the Nth stored value.
//! - `remember_with_key` is key‑based and stable across conditional branches.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use tether_core::*;
//!
//! fn example(user_id: u32) {
//!     disposable_effect(user_id, move || {
//!         log::info!("subscribe {user_id}");
//!         on_unmount(move || log::info!("unsubscribe {user_id}"))
//!     });
//! }
//! ```
//!
//! - effects run after the pass commits, never during the body;
//! - the previous run's `Dispose` runs before the next run;
//! - the last one runs when the component unmounts.
//!
//! ## Structural dependencies
//!
//! `disposable_effect` compares keys with `PartialEq`. When dependencies are
//! composite (lists, records) build a [`Value`] and let a [`ChangeGate`]
//! decide; `tether-hooks` wraps this as `use_deep_compare_effect`.

pub mod compare;
pub mod effects;
pub mod effects_ext;
pub mod gate;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod state;
pub mod value;

pub use compare::*;
pub use effects::*;
pub use effects_ext::*;
pub use gate::*;
pub use prelude::*;
pub use runtime::*;
pub use signal::*;
pub use value::*;
