pub mod format;
pub mod store;

pub use store::{MEMORY_KEY, SettingsStore, USERNAME_KEY, default_value};

use crate::core::{LauncherError, Result};
use log::warn;
use serde::Serialize;

pub const MIN_MEMORY_GIB: u32 = 1;
pub const MAX_MEMORY_GIB: u32 = 32;
pub const DEFAULT_MEMORY_GIB: u32 = 6;

/// The two values the launcher form is pre-filled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub username: String,
    pub memory_gib: u32,
}

impl Preferences {
    /// Read both well-known settings, falling back to the default memory
    /// allocation when the stored value is unusable.
    pub fn read(store: &mut SettingsStore) -> Result<Self> {
        let username = store.get(USERNAME_KEY)?.to_string();
        let raw_memory = store.get(MEMORY_KEY)?;
        let memory_gib = parse_memory(raw_memory).unwrap_or_else(|err| {
            warn!("{}; using {} GiB", err, DEFAULT_MEMORY_GIB);
            DEFAULT_MEMORY_GIB
        });
        Ok(Self {
            username,
            memory_gib,
        })
    }
}

/// Parse a stored memory allocation in GiB.
pub fn parse_memory(raw: &str) -> Result<u32> {
    let value: u32 = raw.trim().parse().map_err(|_| {
        LauncherError::InvalidSetting(MEMORY_KEY.to_string(), format!("'{}' is not a whole number", raw))
    })?;
    if !(MIN_MEMORY_GIB..=MAX_MEMORY_GIB).contains(&value) {
        return Err(LauncherError::InvalidSetting(
            MEMORY_KEY.to_string(),
            format!("{} is outside {}..={}", value, MIN_MEMORY_GIB, MAX_MEMORY_GIB),
        ));
    }
    Ok(value)
}
