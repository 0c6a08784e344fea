use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};

use crate::scope::Scope;

thread_local! {
    static CURRENT: RefCell<Option<Component>> = const { RefCell::new(None) };
}

bitflags! {
    /// Lifecycle state of a [`Component`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Lifecycle: u8 {
        /// At least one pass has committed.
        const MOUNTED = 1 << 0;
        /// State changed since the last pass started; needs another pass.
        const DIRTY = 1 << 1;
        /// Torn down. Further passes do not commit.
        const UNMOUNTED = 1 << 2;
    }
}

/// Slot storage for one component.
#[derive(Default)]
pub struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
    pending: Vec<Box<dyn FnOnce()>>,
}

impl Composer {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn keyed_count(&self) -> usize {
        self.keyed_slots.len()
    }
}

struct Shared {
    flags: Cell<Lifecycle>,
    renders: Cell<u64>,
    on_invalidate: Option<Rc<dyn Fn()>>,
}

impl Shared {
    fn flags(&self) -> Lifecycle {
        self.flags.get()
    }

    fn insert(&self, f: Lifecycle) {
        self.flags.set(self.flags.get() | f);
    }

    fn remove(&self, f: Lifecycle) {
        self.flags.set(self.flags.get() - f);
    }

    fn mark_dirty(&self) -> bool {
        let flags = self.flags();
        if flags.intersects(Lifecycle::UNMOUNTED | Lifecycle::DIRTY) {
            return false;
        }
        self.insert(Lifecycle::DIRTY);
        if let Some(cb) = &self.on_invalidate {
            cb();
        }
        true
    }
}

/// A unit of composition: a slot table, a cleanup scope, and lifecycle flags.
///
/// `Component` is a cheap handle; clones refer to the same instance.
#[derive(Clone)]
pub struct Component {
    composer: Rc<RefCell<Composer>>,
    scope: Scope,
    shared: Rc<Shared>,
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

/// Makes a component current for the duration of a pass.
/// Restores the previous one on drop, also when the body panics.
struct ComposeGuard {
    prev: Option<Component>,
}

impl ComposeGuard {
    fn begin(component: &Component) -> Self {
        let prev = CURRENT.with(|cur| cur.replace(Some(component.clone())));
        ComposeGuard { prev }
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT.with(|cur| {
            *cur.borrow_mut() = prev;
        });
    }
}

impl Component {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// `on_invalidate` runs each time the component goes from clean to dirty.
    pub fn with_invalidate(on_invalidate: impl Fn() + 'static) -> Self {
        Self::build(Some(Rc::new(on_invalidate)))
    }

    fn build(on_invalidate: Option<Rc<dyn Fn()>>) -> Self {
        Self {
            composer: Rc::new(RefCell::new(Composer::default())),
            scope: Scope::new(),
            shared: Rc::new(Shared {
                flags: Cell::new(Lifecycle::empty()),
                renders: Cell::new(0),
                on_invalidate,
            }),
        }
    }

    /// Runs one pass: `body` under this component, then the commit queue.
    pub fn render<R>(&self, body: impl FnOnce() -> R) -> R {
        if self.lifecycle().contains(Lifecycle::UNMOUNTED) {
            log::warn!("render: component is unmounted; running body without composition");
            return body();
        }

        self.composer.borrow_mut().cursor = 0;
        self.shared.remove(Lifecycle::DIRTY);

        let out = {
            let _guard = ComposeGuard::begin(self);
            self.scope.run(body)
        };

        self.commit();
        out
    }

    fn commit(&self) {
        let pending = std::mem::take(&mut self.composer.borrow_mut().pending);
        self.shared.insert(Lifecycle::MOUNTED);
        log::trace!("commit: running {} callbacks", pending.len());
        for f in pending {
            f();
        }
        self.shared.renders.set(self.shared.renders.get() + 1);
    }

    /// Tears the component down: pending callbacks are dropped, unmount
    /// disposers run, slots are released. Idempotent.
    pub fn unmount(&self) {
        if self.lifecycle().contains(Lifecycle::UNMOUNTED) {
            return;
        }
        self.shared.insert(Lifecycle::UNMOUNTED);
        self.shared.remove(Lifecycle::MOUNTED | Lifecycle::DIRTY);

        let (pending, slots, keyed) = {
            let mut c = self.composer.borrow_mut();
            c.cursor = 0;
            (
                std::mem::take(&mut c.pending),
                std::mem::take(&mut c.slots),
                std::mem::take(&mut c.keyed_slots),
            )
        };
        drop(pending);
        self.scope.dispose();
        drop(slots);
        drop(keyed);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.flags()
    }

    pub fn is_dirty(&self) -> bool {
        self.lifecycle().contains(Lifecycle::DIRTY)
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle().contains(Lifecycle::MOUNTED)
    }

    /// Committed passes so far.
    pub fn renders(&self) -> u64 {
        self.shared.renders.get()
    }

    pub fn invalidate(&self) -> bool {
        self.shared.mark_dirty()
    }

    pub fn invalidator(&self) -> Invalidator {
        Invalidator(Rc::downgrade(&self.shared))
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn with_composer<R>(&self, f: impl FnOnce(&Composer) -> R) -> R {
        f(&self.composer.borrow())
    }

    fn remember<T: 'static>(&self, init: impl FnOnce() -> T) -> Rc<T> {
        let cursor = {
            let mut c = self.composer.borrow_mut();
            let cursor = c.cursor;
            c.cursor += 1;

            match c.slots.get(cursor) {
                Some(slot) => {
                    if let Some(rc) = slot.downcast_ref::<Rc<T>>() {
                        return rc.clone();
                    }
                    log::warn!(
                        "remember: slot {} type changed; replacing. \
                         If this is due to conditional composition, prefer remember_with_key.",
                        cursor
                    );
                }
                // Reserve the position so slots claimed inside `init` land after it.
                None => c.slots.push(Box::new(())),
            }
            cursor
        };

        let rc: Rc<T> = Rc::new(init());
        let boxed: Box<dyn Any> = Box::new(rc.clone());
        let old = std::mem::replace(&mut self.composer.borrow_mut().slots[cursor], boxed);
        drop(old);
        rc
    }

    fn remember_with_key<T: 'static>(&self, key: String, init: impl FnOnce() -> T) -> Rc<T> {
        {
            let c = self.composer.borrow();
            if let Some(existing) = c.keyed_slots.get(&key) {
                if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                    return rc.clone();
                }
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
        }

        let rc: Rc<T> = Rc::new(init());
        let old = self
            .composer
            .borrow_mut()
            .keyed_slots
            .insert(key, Box::new(rc.clone()));
        drop(old);
        rc
    }

    fn push_pending(&self, f: Box<dyn FnOnce()>) {
        self.composer.borrow_mut().pending.push(f);
    }
}

/// Weak handle that schedules another pass of its component.
#[derive(Clone)]
pub struct Invalidator(Weak<Shared>);

impl Invalidator {
    /// Marks the component dirty. Returns false if it already was, or is gone.
    pub fn invalidate(&self) -> bool {
        self.0.upgrade().is_some_and(|s| s.mark_dirty())
    }

    pub fn is_alive(&self) -> bool {
        self.0
            .upgrade()
            .is_some_and(|s| !s.flags().contains(Lifecycle::UNMOUNTED))
    }
}

pub fn current_component() -> Option<Component> {
    CURRENT.with(|cur| cur.borrow().clone())
}

pub fn current_invalidator() -> Option<Invalidator> {
    current_component().map(|c| c.invalidator())
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    match current_component() {
        Some(c) => c.remember(init),
        None => {
            log::warn!("remember: called outside of a composition; value will not persist");
            Rc::new(init())
        }
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    match current_component() {
        Some(c) => c.remember_with_key(key.into(), init),
        None => {
            log::warn!("remember_with_key: called outside of a composition; value will not persist");
            Rc::new(init())
        }
    }
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Queues `f` to run once the current pass commits.
///
/// Outside of a composition there is nothing to commit, so `f` runs now.
pub fn on_commit(f: impl FnOnce() + 'static) {
    match current_component() {
        Some(c) => c.push_pending(Box::new(f)),
        None => {
            log::warn!("on_commit: called outside of a composition; running now");
            f()
        }
    }
}

new_key_type! {
    pub struct ComponentKey;
}

#[derive(Clone, Copy, Debug)]
pub struct SchedulerConfig {
    /// Upper bound on re-render rounds per `flush`.
    pub max_passes: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { max_passes: 64 }
    }
}

struct Mounted {
    component: Component,
    body: Rc<dyn Fn()>,
}

/// Owns mounted components and re-renders them until they settle.
pub struct Scheduler {
    config: SchedulerConfig,
    mounted: SlotMap<ComponentKey, Mounted>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            mounted: SlotMap::with_key(),
        }
    }

    /// Creates a component for `body` and runs its first pass.
    pub fn mount(&mut self, body: impl Fn() + 'static) -> ComponentKey {
        let component = Component::new();
        let body: Rc<dyn Fn()> = Rc::new(body);
        component.render(|| body());
        let key = self.mounted.insert(Mounted { component, body });
        log::debug!("scheduler: mounted {:?}", key);
        key
    }

    /// Re-renders dirty components until none are dirty or the pass bound is
    /// reached. Returns how many passes ran.
    pub fn flush(&mut self) -> usize {
        let mut rendered = 0;
        for _ in 0..self.config.max_passes {
            let dirty: Vec<ComponentKey> = self
                .mounted
                .iter()
                .filter(|(_, m)| m.component.is_dirty())
                .map(|(k, _)| k)
                .collect();
            if dirty.is_empty() {
                return rendered;
            }
            for key in dirty {
                let Some(m) = self.mounted.get(key) else {
                    continue;
                };
                let (component, body) = (m.component.clone(), m.body.clone());
                component.render(|| body());
                rendered += 1;
            }
        }

        if self.mounted.values().any(|m| m.component.is_dirty()) {
            log::warn!(
                "scheduler: components still dirty after {} passes; stopping",
                self.config.max_passes
            );
        }
        rendered
    }

    pub fn unmount(&mut self, key: ComponentKey) -> bool {
        match self.mounted.remove(key) {
            Some(m) => {
                m.component.unmount();
                log::debug!("scheduler: unmounted {:?}", key);
                true
            }
            None => false,
        }
    }

    pub fn component(&self, key: ComponentKey) -> Option<&Component> {
        self.mounted.get(key).map(|m| &m.component)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for (_, m) in self.mounted.drain() {
            m.component.unmount();
        }
    }
}
