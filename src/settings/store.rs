//! File-backed key/value store for launcher preferences.

use super::format::{format_line, parse_line, round_trips};
use crate::core::{LauncherError, Result};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// ============================================================================
// Well-known keys
// ============================================================================

pub const USERNAME_KEY: &str = "username";
pub const MEMORY_KEY: &str = "memory";

/// Values handed out for well-known keys the file does not contain.
const DEFAULTS: &[(&str, &str)] = &[(USERNAME_KEY, ""), (MEMORY_KEY, "6")];

pub fn default_value(key: &str) -> Option<&'static str> {
    DEFAULTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

// ============================================================================
// Settings Store
// ============================================================================

/// In-memory view of the settings file.
///
/// The file is read lazily on first access and only rewritten by [`save`].
/// All mutations happen on the in-memory map, so the store is meant to be
/// created once at startup and passed by `&mut` to whoever needs it.
///
/// [`save`]: SettingsStore::save
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    loaded: bool,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: BTreeMap::new(),
            loaded: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory entries. Does not trigger a load.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Value for `key`, falling back to (and remembering) its default.
    ///
    /// Fails with [`LauncherError::UnknownSetting`] when the key is neither
    /// stored nor one of the well-known keys.
    pub fn get(&mut self, key: &str) -> Result<&str> {
        self.ensure_loaded();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                let default = default_value(key)
                    .ok_or_else(|| LauncherError::UnknownSetting(key.to_string()))?;
                Ok(entry.insert(default.to_string()).as_str())
            }
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ensure_loaded();
        self.entries.insert(key.into(), value.into());
    }

    /// Discard the in-memory map and read the backing file again.
    ///
    /// A missing file is created empty. Read errors are logged; whatever was
    /// parsed before the error is kept.
    pub fn load(&mut self) {
        self.entries.clear();
        self.loaded = true;
        if let Err(err) = self.read_file() {
            warn!(
                "failed to read settings: path='{}' error='{}' kept_entries={}",
                self.path.display(),
                err,
                self.entries.len()
            );
        }
    }

    /// Replace the backing file with the in-memory map.
    ///
    /// Returns `false` when the write failed; the failure is logged and the
    /// previous file, if any, is left untouched.
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "failed to save settings: path='{}' error='{}'",
                    self.path.display(),
                    err
                );
                false
            }
        }
    }

    pub fn try_save(&mut self) -> Result<()> {
        self.ensure_loaded();

        for (key, value) in &self.entries {
            if !round_trips(key, value) {
                warn!("setting '{}' contains '=' or a line break and will not load back", key);
            }
        }

        // Write through a symlinked settings file instead of replacing the link.
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = parent_dir(&target);
        fs::create_dir_all(&dir)
            .map_err(|e| LauncherError::IoError(format!("Failed to create settings directory: {}", e)))?;

        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|e| LauncherError::IoError(format!("Failed to create temp file: {}", e)))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            for (key, value) in &self.entries {
                writer
                    .write_all(format_line(key, value).as_bytes())
                    .map_err(|e| LauncherError::IoError(format!("Failed to write settings: {}", e)))?;
            }
            writer
                .flush()
                .map_err(|e| LauncherError::IoError(format!("Failed to flush settings: {}", e)))?;
        }
        if let Ok(metadata) = fs::metadata(&target) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| LauncherError::IoError(format!("Failed to copy settings permissions: {}", e)))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| LauncherError::IoError(format!("Failed to sync settings: {}", e)))?;
        temp.persist(&target)
            .map_err(|e| LauncherError::IoError(format!("Failed to replace settings file: {}", e)))?;

        debug!("saved {} settings to '{}'", self.entries.len(), self.path.display());
        Ok(())
    }

    fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load();
        }
    }

    fn read_file(&mut self) -> Result<()> {
        if !self.path.exists() {
            fs::create_dir_all(parent_dir(&self.path))
                .map_err(|e| LauncherError::IoError(format!("Failed to create settings directory: {}", e)))?;
            File::create(&self.path)
                .map_err(|e| LauncherError::IoError(format!("Failed to create settings file: {}", e)))?;
            debug!("created empty settings file '{}'", self.path.display());
            return Ok(());
        }

        let file = File::open(&self.path)
            .map_err(|e| LauncherError::IoError(format!("Failed to open settings file: {}", e)))?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut number = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| LauncherError::IoError(format!("Failed to read settings line {}: {}", number + 1, e)))?;
            if read == 0 {
                break;
            }
            number += 1;

            // Undecodable bytes must not cost the lines around them.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            match parse_line(line) {
                Some((key, value)) => {
                    self.entries.insert(key.to_string(), value.to_string());
                }
                None => debug!("skipping malformed settings line {}", number),
            }
        }
        debug!("loaded {} settings from '{}'", self.entries.len(), self.path.display());
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
