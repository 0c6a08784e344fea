//! # Persisted state
//!
//! `use_local_storage` / `use_session_storage` keep a value in the host's
//! key-value storage, encoded as JSON:
//!
//! ```rust
//! use tether_core::Component;
//! use tether_hooks::*;
//!
//! let backend = std::rc::Rc::new(MemoryStorage::new());
//! let c = Component::new();
//! let theme = c.render(|| use_storage(backend.clone(), "theme", "dark".to_string()));
//!
//! assert_eq!(theme.value().as_deref(), Some("dark"));
//! theme.set("light".into()).unwrap();
//! assert_eq!(backend.raw("theme").as_deref(), Some("\"light\""));
//! ```
//!
//! On the web (`wasm32`) the backends are `window.localStorage` and
//! `window.sessionStorage`. Elsewhere they are in-memory maps that live as
//! long as the thread.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tether_core::{State, remember, use_state};

use crate::StorageError;

pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend. Clones share the same map, across threads too.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn clear(&self) {
        self.items.lock().clear();
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;

    use super::StorageBackend;
    use crate::StorageError;

    fn js_err(e: JsValue) -> StorageError {
        StorageError::Backend(e.as_string().unwrap_or_else(|| format!("{e:?}")))
    }

    /// `window.localStorage` / `window.sessionStorage`.
    pub struct WebStorage(web_sys::Storage);

    impl WebStorage {
        pub fn local() -> Result<Self, StorageError> {
            let window = web_sys::window().ok_or(StorageError::Unavailable)?;
            let storage = window.local_storage().map_err(js_err)?;
            storage.map(Self).ok_or(StorageError::Unavailable)
        }

        pub fn session() -> Result<Self, StorageError> {
            let window = web_sys::window().ok_or(StorageError::Unavailable)?;
            let storage = window.session_storage().map_err(js_err)?;
            storage.map(Self).ok_or(StorageError::Unavailable)
        }
    }

    impl StorageBackend for WebStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_item(key).map_err(js_err)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.set_item(key, value).map_err(js_err)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove_item(key).map_err(js_err)
        }
    }
}

#[derive(Clone, Copy)]
enum Area {
    Local,
    Session,
}

#[cfg(target_arch = "wasm32")]
fn host_backend(area: Area) -> Rc<dyn StorageBackend> {
    let web = match area {
        Area::Local => WebStorage::local(),
        Area::Session => WebStorage::session(),
    };
    match web {
        Ok(s) => Rc::new(s),
        Err(e) => {
            log::warn!("storage: web storage unavailable ({e}); falling back to memory");
            Rc::new(MemoryStorage::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn host_backend(area: Area) -> Rc<dyn StorageBackend> {
    let _ = area;
    Rc::new(MemoryStorage::new())
}

thread_local! {
    static LOCAL: Rc<dyn StorageBackend> = host_backend(Area::Local);
    static SESSION: Rc<dyn StorageBackend> = host_backend(Area::Session);
}

pub fn local_storage() -> Rc<dyn StorageBackend> {
    LOCAL.with(Rc::clone)
}

pub fn session_storage() -> Rc<dyn StorageBackend> {
    SESSION.with(Rc::clone)
}

/// Handle returned by [`use_storage`].
pub struct Stored<T: 'static> {
    key: Rc<RefCell<String>>,
    backend: Rc<dyn StorageBackend>,
    state: State<Option<T>>,
}

impl<T> Clone for Stored<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            backend: self.backend.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: Serialize + Clone + 'static> Stored<T> {
    /// `None` after [`Stored::remove`].
    pub fn value(&self) -> Option<T> {
        self.state.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        self.state.with(|v| f(v.as_ref()))
    }

    pub fn key(&self) -> String {
        self.key.borrow().clone()
    }

    /// Writes through to the backend, then updates the in-memory value.
    pub fn set(&self, value: T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&value)?;
        self.backend.set_item(&self.key.borrow(), &raw)?;
        self.state.set(Some(value));
        Ok(())
    }

    pub fn remove(&self) -> Result<(), StorageError> {
        self.backend.remove_item(&self.key.borrow())?;
        self.state.set(None);
        Ok(())
    }
}

fn load_or_seed<T>(backend: &dyn StorageBackend, key: &str, initial: T) -> T
where
    T: Serialize + DeserializeOwned,
{
    match backend.get_item(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("storage: could not parse '{key}': {e}; using initial value");
                initial
            }
        },
        Ok(None) => {
            let seeded = serde_json::to_string(&initial)
                .map_err(StorageError::from)
                .and_then(|raw| backend.set_item(key, &raw));
            if let Err(e) = seeded {
                log::warn!("storage: could not seed '{key}': {e}");
            }
            initial
        }
        Err(e) => {
            log::warn!("storage: could not read '{key}': {e}; using initial value");
            initial
        }
    }
}

/// Keeps a JSON-encoded value under `key` in `backend`.
///
/// The first pass reads the key; a missing key is written with `initial`.
/// When `key` changes between passes the new key is loaded the same way.
pub fn use_storage<T>(backend: Rc<dyn StorageBackend>, key: &str, initial: T) -> Stored<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    let current_key = remember(|| RefCell::new(key.to_owned()));
    let state = use_state(|| Some(load_or_seed(backend.as_ref(), key, initial.clone())));

    let key_changed = *current_key.borrow() != key;
    if key_changed {
        log::debug!("storage: key changed to '{key}'; reloading");
        *current_key.borrow_mut() = key.to_owned();
        let loaded = load_or_seed(backend.as_ref(), key, initial);
        // Read by this same pass, so no further pass is scheduled.
        state.update_if(|v| {
            *v = Some(loaded);
            false
        });
    }

    Stored {
        key: current_key,
        backend,
        state,
    }
}

pub fn use_local_storage<T>(key: &str, initial: T) -> Stored<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    use_storage(local_storage(), key, initial)
}

pub fn use_session_storage<T>(key: &str, initial: T) -> Stored<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    use_storage(session_storage(), key, initial)
}
