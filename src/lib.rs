// ============================================================================
// Offline Launcher Library
// ============================================================================

pub mod core;
pub mod config;
pub mod settings;
pub mod launch;

// Re-export main types for convenience
pub use crate::core::{LauncherError, Result};
pub use config::LauncherConfig;
pub use settings::{Preferences, SettingsStore};
pub use launch::{
    LaunchCommandBuilder, LaunchOutcome, LaunchReport, ProcessLauncher, RenderedCommand,
    SystemLauncher, TemplateSource,
};

// ============================================================================
// High-level Launcher API
// ============================================================================

/// Settings store and command builder wired together from one configuration.
///
/// Create it once at startup, hand [`Launcher::preferences`] to the form and
/// call [`Launcher::launch`] with what the user entered.
///
/// # Examples
///
/// ```no_run
/// use offline_launcher::{Launcher, LauncherConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LauncherConfig::from_current_dir()?;
/// let mut launcher = Launcher::open(config)?;
///
/// let prefs = launcher.preferences()?;
/// let report = launcher.launch(&prefs.username, prefs.memory_gib);
/// println!("started: {}", report.outcome.is_started());
/// # Ok(())
/// # }
/// ```
pub struct Launcher<L: ProcessLauncher = SystemLauncher> {
    store: SettingsStore,
    builder: LaunchCommandBuilder<L>,
}

impl Launcher<SystemLauncher> {
    /// Validate the configuration and prepare a launcher that starts real
    /// processes.
    pub fn open(config: LauncherConfig) -> Result<Self> {
        Self::with_process_launcher(config, SystemLauncher)
    }
}

impl<L: ProcessLauncher> Launcher<L> {
    pub fn with_process_launcher(config: LauncherConfig, process_launcher: L) -> Result<Self> {
        config.validate()?;
        let store = SettingsStore::new(config.settings_file());
        let builder =
            LaunchCommandBuilder::new(config.template.clone(), config.working_dir.clone(), process_launcher);
        Ok(Self { store, builder })
    }

    /// Stored name and memory allocation, or their defaults.
    pub fn preferences(&mut self) -> Result<Preferences> {
        Preferences::read(&mut self.store)
    }

    /// Rendered command for the given values, without saving or starting anything.
    pub fn render(&self, username: &str, memory_gib: u32) -> Result<RenderedCommand> {
        self.builder.render(username, memory_gib)
    }

    pub fn launch(&mut self, username: &str, memory_gib: u32) -> LaunchReport {
        self.builder.launch(&mut self.store, username, memory_gib)
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn builder(&self) -> &LaunchCommandBuilder<L> {
        &self.builder
    }
}
