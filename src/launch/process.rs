use super::template::RenderedCommand;
use crate::core::{LauncherError, Result};
use log::info;
use std::path::Path;
use std::process::Command;

/// Starts external processes.
///
/// `Ok` means the OS accepted the process; nothing is reported about how the
/// child eventually exits.
pub trait ProcessLauncher {
    fn spawn(&mut self, command: &RenderedCommand, working_dir: &Path) -> Result<()>;
}

/// Spawns the program directly (no shell) with the inherited environment and
/// does not wait for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn spawn(&mut self, command: &RenderedCommand, working_dir: &Path) -> Result<()> {
        let (program, args) = command
            .argv()
            .split_first()
            .ok_or_else(|| LauncherError::LaunchError("Rendered command is empty".to_string()))?;

        let child = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .spawn()
            .map_err(|e| LauncherError::LaunchError(format!("Failed to start '{}': {}", program, e)))?;

        info!("started '{}' as pid {}", program, child.id());
        Ok(())
    }
}
