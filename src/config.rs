use crate::core::{LauncherError, Result};
use crate::launch::TemplateSource;
use std::path::{Path, PathBuf};

/// Default settings file name, resolved against the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "launcher.dat";

/// Launcher configuration
///
/// Paths are taken as given; a relative settings path is resolved against the
/// working directory by [`LauncherConfig::settings_file`].
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Backing file of the settings store
    pub settings_path: PathBuf,

    /// Where the command template comes from
    pub template: TemplateSource,

    /// Directory substituted for `%cd%` and used as the child's working directory
    pub working_dir: PathBuf,
}

impl LauncherConfig {
    /// Configuration rooted at `working_dir` with the bundled template.
    pub fn new<P: AsRef<Path>>(working_dir: P) -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_FILE),
            template: TemplateSource::Bundled,
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    /// Configuration rooted at the process's current directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            LauncherError::ConfigError(format!("Cannot determine current directory: {}", e))
        })?;
        Ok(Self::new(cwd))
    }

    /// Set the settings file
    pub fn settings_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings_path = path.as_ref().to_path_buf();
        self
    }

    /// Read the template from a file instead of the bundled one
    pub fn template_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template = TemplateSource::File(path.as_ref().to_path_buf());
        self
    }

    /// Set the working directory
    pub fn working_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Settings file location with a relative path resolved against the
    /// working directory.
    pub fn settings_file(&self) -> PathBuf {
        if self.settings_path.is_absolute() {
            self.settings_path.clone()
        } else {
            self.working_dir.join(&self.settings_path)
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.working_dir.is_dir() {
            return Err(LauncherError::ConfigError(format!(
                "Working directory '{}' does not exist",
                self.working_dir.display()
            )));
        }

        if self.settings_path.as_os_str().is_empty() {
            return Err(LauncherError::ConfigError(
                "Settings path cannot be empty".to_string(),
            ));
        }

        if let TemplateSource::File(path) = &self.template {
            if !path.is_file() {
                return Err(LauncherError::ConfigError(format!(
                    "Template '{}' is not a file",
                    path.display()
                )));
            }
            self.template
                .load()
                .map_err(|e| LauncherError::ConfigError(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LauncherConfig::new("/opt/game");
        assert_eq!(config.settings_path, PathBuf::from("launcher.dat"));
        assert_eq!(config.template, TemplateSource::Bundled);
        assert_eq!(config.settings_file(), PathBuf::from("/opt/game/launcher.dat"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = LauncherConfig::new("/opt/game")
            .settings_path("/etc/launcher/prefs.dat")
            .template_file("/etc/launcher/launch.cmd")
            .working_dir("/srv/game");

        assert_eq!(config.working_dir, PathBuf::from("/srv/game"));
        assert_eq!(
            config.template,
            TemplateSource::File(PathBuf::from("/etc/launcher/launch.cmd"))
        );
        assert_eq!(config.settings_file(), PathBuf::from("/etc/launcher/prefs.dat"));
    }

    #[test]
    fn test_validate() {
        let temp_dir = TempDir::new().unwrap();
        let valid = LauncherConfig::new(temp_dir.path());
        assert!(valid.validate().is_ok());

        let missing_dir = LauncherConfig::new(temp_dir.path().join("missing"));
        assert!(missing_dir.validate().is_err());

        let missing_template =
            LauncherConfig::new(temp_dir.path()).template_file(temp_dir.path().join("launch.cmd"));
        assert!(missing_template.validate().is_err());

        let template = temp_dir.path().join("binary.cmd");
        std::fs::write(&template, b"game \xff\xfe {name}").unwrap();
        let unreadable_template = LauncherConfig::new(temp_dir.path()).template_file(&template);
        assert!(matches!(
            unreadable_template.validate(),
            Err(LauncherError::ConfigError(_))
        ));

        let readable = temp_dir.path().join("launch.cmd");
        std::fs::write(&readable, "game {name}").unwrap();
        assert!(LauncherConfig::new(temp_dir.path()).template_file(&readable).validate().is_ok());

        let empty_settings = LauncherConfig::new(temp_dir.path()).settings_path("");
        assert!(empty_settings.validate().is_err());
    }
}
