//! `localStorage` preferences.

use showroom_core::{PreferenceStore, ShowroomError, ShowroomResult};
use web_sys::Storage;

/// Theme persistence backed by `window.localStorage`.
///
/// Values are stored raw, not JSON-encoded, so the stored theme stays a plain
/// id like `sport`.
#[derive(Debug, Clone)]
pub struct LocalPreferenceStore {
    storage: Option<Storage>,
}

impl LocalPreferenceStore {
    /// Open `localStorage`. A browser with storage disabled yields a store
    /// whose operations all fail.
    pub fn open(window: &web_sys::Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> ShowroomResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| ShowroomError::Storage("localStorage unavailable".to_string()))
    }
}

impl PreferenceStore for LocalPreferenceStore {
    fn get(&self, key: &str) -> ShowroomResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| ShowroomError::Storage(format!("read {}: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> ShowroomResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| ShowroomError::Storage(format!("write {}: {:?}", key, e)))
    }
}
