use super::process::{ProcessLauncher, SystemLauncher};
use super::sanitize::sanitize_identity;
use super::template::{RenderedCommand, TemplateSource, TemplateValues};
use crate::core::{LauncherError, Result};
use crate::settings::{MEMORY_KEY, SettingsStore, USERNAME_KEY};
use log::{info, warn};
use std::path::PathBuf;

/// What happened to the start request.
#[derive(Debug)]
pub enum LaunchOutcome {
    Started,
    NotStarted(LauncherError),
}

impl LaunchOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, LaunchOutcome::Started)
    }
}

/// Summary of one [`LaunchCommandBuilder::launch`] call.
#[derive(Debug)]
pub struct LaunchReport {
    /// Name after sanitization, as stored and substituted.
    pub identity: String,
    pub memory_gib: u32,
    pub settings_saved: bool,
    /// `None` when the template could not be read.
    pub command: Option<RenderedCommand>,
    pub outcome: LaunchOutcome,
}

/// Turns the form values into a command and hands it to a [`ProcessLauncher`].
pub struct LaunchCommandBuilder<L: ProcessLauncher = SystemLauncher> {
    template: TemplateSource,
    working_dir: PathBuf,
    launcher: L,
}

impl<L: ProcessLauncher> LaunchCommandBuilder<L> {
    pub fn new(template: TemplateSource, working_dir: PathBuf, launcher: L) -> Self {
        let working_dir = std::path::absolute(&working_dir).unwrap_or(working_dir);
        Self {
            template,
            working_dir,
            launcher,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Sanitize `identity_input` and render the template without side effects.
    pub fn render(&self, identity_input: &str, memory_gib: u32) -> Result<RenderedCommand> {
        let identity = sanitize_identity(identity_input);
        self.render_sanitized(&identity, memory_gib)
    }

    fn render_sanitized(&self, identity: &str, memory_gib: u32) -> Result<RenderedCommand> {
        let template = self.template.load()?;
        Ok(template.render(&TemplateValues {
            identity,
            memory_gib,
            working_dir: &self.working_dir,
        }))
    }

    /// Persist the values, render the template and request the process start.
    ///
    /// Never fails: a failed save is logged and the launch still goes ahead;
    /// a failed template read or spawn is reported in the returned outcome.
    pub fn launch(
        &mut self,
        store: &mut SettingsStore,
        identity_input: &str,
        memory_gib: u32,
    ) -> LaunchReport {
        let identity = sanitize_identity(identity_input);
        if identity != identity_input {
            info!("player name sanitized: '{}' -> '{}'", identity_input, identity);
        }
        if identity.is_empty() {
            warn!("launching with an empty player name");
        }
        if memory_gib == 0 {
            warn!("launching with a memory allocation of 0 GiB");
        }

        store.set(USERNAME_KEY, identity.clone());
        store.set(MEMORY_KEY, memory_gib.to_string());
        let settings_saved = store.save();

        let command = match self.render_sanitized(&identity, memory_gib) {
            Ok(command) => command,
            Err(err) => {
                warn!("launch aborted: {}", err);
                return LaunchReport {
                    identity,
                    memory_gib,
                    settings_saved,
                    command: None,
                    outcome: LaunchOutcome::NotStarted(err),
                };
            }
        };

        info!("launching: {}", command);
        let outcome = match self.launcher.spawn(&command, &self.working_dir) {
            Ok(()) => LaunchOutcome::Started,
            Err(err) => {
                warn!("launch failed: {}", err);
                LaunchOutcome::NotStarted(err)
            }
        };

        LaunchReport {
            identity,
            memory_gib,
            settings_saved,
            command: Some(command),
            outcome,
        }
    }
}
