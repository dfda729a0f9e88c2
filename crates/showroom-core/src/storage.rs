//! Preference persistence.
//!
//! The page persists exactly one value: the active theme, under the `"theme"`
//! key. Backends are fallible; callers decide how to degrade.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ShowroomError, ShowroomResult};

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "theme";

/// String key/value store that survives page loads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> ShowroomResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ShowroomResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    fn get(&self, key: &str) -> ShowroomResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ShowroomResult<()> {
        (**self).set(key, value)
    }
}

/// Volatile store, used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Store whose every operation fails, like a browser with storage
    /// disabled.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> ShowroomResult<Option<String>> {
        if self.unavailable {
            return Err(ShowroomError::Storage("storage disabled".to_string()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ShowroomResult<()> {
        if self.unavailable {
            return Err(ShowroomError::Storage("storage disabled".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The single persisted theme value on top of any [`PreferenceStore`].
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
}

impl<S: PreferenceStore> ThemePreference<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Raw persisted value, unvalidated.
    pub fn load(&self) -> ShowroomResult<Option<String>> {
        self.store.get(THEME_KEY)
    }

    pub fn save(&self, theme: &str) -> ShowroomResult<()> {
        self.store.set(THEME_KEY, theme)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
