use std::any::Any;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::PropertyKey;

/// Typed property store shared by every node of one tree instance.
///
/// Two channels share the key space but never each other's entries:
///
/// - the *value channel* holds `Copy` data (vectors, flags, counters, hit results) and hands out
///   copies;
/// - the *reference channel* holds non-owning handles to objects the host owns behind an `Rc`
///   (agents, transforms, components). Reads return the same shared instance until the key is
///   overwritten. The blackboard never keeps such an object alive: once the host drops it, reads
///   report it as absent.
///
/// A lookup that misses (absent key, other stored type, dropped object) returns `None`; it is an
/// ordinary outcome for callers, not an error.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<PropertyKey, Box<dyn Any>>,
    refs: BTreeMap<PropertyKey, Weak<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry from both channels.
    pub fn clear(&mut self) {
        self.values.clear();
        self.refs.clear();
    }

    pub fn len_values(&self) -> usize {
        self.values.len()
    }

    pub fn len_refs(&self) -> usize {
        self.refs.len()
    }

    pub fn contains_value<T: Copy + 'static>(&self, key: PropertyKey) -> bool {
        self.values.get(&key).is_some_and(|v| v.is::<T>())
    }

    pub fn set_value<T: Copy + 'static>(&mut self, key: PropertyKey, value: T) {
        self.values.insert(key, Box::new(value));
    }

    pub fn try_get_value<T: Copy + 'static>(&self, key: PropertyKey) -> Option<T> {
        self.values.get(&key)?.downcast_ref::<T>().copied()
    }

    /// Remove a value entry, returning it when it held a `T`.
    pub fn remove_value<T: Copy + 'static>(&mut self, key: PropertyKey) -> Option<T> {
        let value = self.values.remove(&key)?;
        value.downcast::<T>().map(|b| *b).ok()
    }

    pub fn contains_ref<T: 'static>(&self, key: PropertyKey) -> bool {
        self.try_get_ref::<T>(key).is_some()
    }

    /// Store a handle to a host-owned object. Only a weak handle is kept.
    pub fn set_ref<T: 'static>(&mut self, key: PropertyKey, object: &Rc<T>) {
        let erased: Rc<dyn Any> = object.clone();
        self.refs.insert(key, Rc::downgrade(&erased));
    }

    pub fn try_get_ref<T: 'static>(&self, key: PropertyKey) -> Option<Rc<T>> {
        let object = self.refs.get(&key)?.upgrade()?;
        object.downcast::<T>().ok()
    }

    /// Forget a reference entry. The referenced object itself is left to its owner.
    pub fn remove_ref(&mut self, key: PropertyKey) -> bool {
        self.refs.remove(&key).is_some()
    }
}

impl core::fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Blackboard")
            .field("values", &self.values.keys().collect::<Vec<_>>())
            .field("refs", &self.refs.keys().collect::<Vec<_>>())
            .finish()
    }
}
