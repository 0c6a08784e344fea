use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use tether_core::{State, remember, use_state};

pub struct MapHandle<K: 'static, V: 'static> {
    state: State<HashMap<K, V>>,
    initial: Rc<HashMap<K, V>>,
}

impl<K, V> Clone for MapHandle<K, V> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            initial: self.initial.clone(),
        }
    }
}

impl<K, V> MapHandle<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    pub fn get(&self, key: &K) -> Option<V> {
        self.state.with(|m| m.get(key).cloned())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.state.with(|m| m.contains_key(key))
    }

    pub fn len(&self) -> usize {
        self.state.with(HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> HashMap<K, V> {
        self.state.get()
    }

    pub fn set(&self, key: K, value: V) {
        self.state.update(|m| {
            m.insert(key, value);
        });
    }

    /// Removes `key`; does not re-render when it was absent.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut removed = None;
        self.state.update_if(|m| {
            removed = m.remove(key);
            removed.is_some()
        });
        removed
    }

    pub fn set_all(&self, entries: HashMap<K, V>) {
        self.state.set(entries);
    }

    pub fn reset(&self) {
        self.state.set((*self.initial).clone());
    }
}

pub fn use_map<K, V>(initial: HashMap<K, V>) -> MapHandle<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    let initial = remember(move || initial);
    let state = use_state(|| (*initial).clone());
    MapHandle { state, initial }
}
