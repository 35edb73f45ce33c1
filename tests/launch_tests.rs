//! Integration tests for the launch sequence

use offline_launcher::launch::{CommandTemplate, TemplateValues, sanitize_identity};
use offline_launcher::settings::{MEMORY_KEY, USERNAME_KEY};
use offline_launcher::{
    LaunchOutcome, Launcher, LauncherConfig, LauncherError, ProcessLauncher, RenderedCommand,
    Result, SettingsStore,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingLauncher {
    commands: Vec<RenderedCommand>,
    working_dirs: Vec<PathBuf>,
    refuse: bool,
}

impl ProcessLauncher for RecordingLauncher {
    fn spawn(&mut self, command: &RenderedCommand, working_dir: &Path) -> Result<()> {
        self.commands.push(command.clone());
        self.working_dirs.push(working_dir.to_path_buf());
        if self.refuse {
            return Err(LauncherError::LaunchError("spawn refused".to_string()));
        }
        Ok(())
    }
}

fn launcher_with_template(dir: &Path, template: &str) -> Launcher<RecordingLauncher> {
    let template_path = dir.join("launch.cmd");
    fs::write(&template_path, template).unwrap();
    let config = LauncherConfig::new(dir).template_file(&template_path);
    Launcher::with_process_launcher(config, RecordingLauncher::default()).unwrap()
}

#[test]
fn test_render_example_command() {
    let template = CommandTemplate::new("run --user={name} --mem={ram}g --dir=%cd%");
    let rendered = template.render(&TemplateValues {
        identity: "alice",
        memory_gib: 8,
        working_dir: Path::new("/opt/app"),
    });

    assert_eq!(rendered.line(), "run --user=alice --mem=8g --dir=/opt/app");
}

#[test]
fn test_injection_attempts_neutralized() {
    let temp_dir = TempDir::new().unwrap();
    let mut launcher = launcher_with_template(temp_dir.path(), "game --username {name} --mem {ram}");

    for input in ["foo; rm -rf /", "foo$(whoami)", "foo bar", "x --server evil.example", "`id`|sh"] {
        let command = launcher.render(input, 4).unwrap();
        let user_arg = &command.argv()[2];

        assert_eq!(command.argv().len(), 5, "input {:?} changed the argument count", input);
        assert!(
            user_arg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "unsafe token {:?} from {:?}",
            user_arg,
            input
        );
        for meta in [";", "$", "(", ")", "`", "|", "&", ">", "<", "'", "\""] {
            assert!(!command.line().contains(meta));
        }
    }

    let report = launcher.launch("x --server evil.example", 4);
    assert_eq!(report.identity, "x_server_evilexample");
    assert_eq!(report.identity, sanitize_identity("x --server evil.example"));
}

#[test]
fn test_launch_saves_and_spawns_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut launcher = launcher_with_template(temp_dir.path(), "game -u {name} -m {ram}G -d %cd%");

    let report = launcher.launch("Steve", 10);

    assert!(report.outcome.is_started());
    assert!(report.settings_saved);
    let recorder = launcher.builder().launcher();
    assert_eq!(recorder.commands.len(), 1);
    assert_eq!(
        recorder.commands[0].line(),
        format!("game -u Steve -m 10G -d {}", temp_dir.path().display())
    );
    assert_eq!(recorder.working_dirs[0], temp_dir.path());

    let mut reopened = SettingsStore::new(temp_dir.path().join("launcher.dat"));
    assert_eq!(reopened.get(USERNAME_KEY).unwrap(), "Steve");
    assert_eq!(reopened.get(MEMORY_KEY).unwrap(), "10");
}

#[test]
fn test_launch_spawns_even_when_save_fails() {
    let temp_dir = TempDir::new().unwrap();
    let template_path = temp_dir.path().join("launch.cmd");
    fs::write(&template_path, "game {name}").unwrap();
    // The settings "file" is a directory, so every write to it fails.
    fs::create_dir(temp_dir.path().join("blocked.dat")).unwrap();
    let config = LauncherConfig::new(temp_dir.path())
        .settings_path("blocked.dat")
        .template_file(&template_path);
    let mut launcher = Launcher::with_process_launcher(config, RecordingLauncher::default()).unwrap();

    let report = launcher.launch("alex", 4);

    assert!(!report.settings_saved);
    assert!(report.outcome.is_started());
    assert_eq!(launcher.builder().launcher().commands.len(), 1);
}

#[test]
fn test_spawn_refusal_reported() {
    let temp_dir = TempDir::new().unwrap();
    let template_path = temp_dir.path().join("launch.cmd");
    fs::write(&template_path, "game {name}").unwrap();
    let config = LauncherConfig::new(temp_dir.path()).template_file(&template_path);
    let recorder = RecordingLauncher {
        refuse: true,
        ..RecordingLauncher::default()
    };
    let mut launcher = Launcher::with_process_launcher(config, recorder).unwrap();

    let report = launcher.launch("alex", 4);

    assert!(matches!(report.outcome, LaunchOutcome::NotStarted(_)));
    assert_eq!(launcher.builder().launcher().commands.len(), 1);
    assert!(report.settings_saved);
}

#[test]
fn test_preferences_default_then_remembered() {
    let temp_dir = TempDir::new().unwrap();
    let mut launcher = launcher_with_template(temp_dir.path(), "game {name}");

    let prefs = launcher.preferences().unwrap();
    assert_eq!(prefs.username, "");
    assert_eq!(prefs.memory_gib, 6);

    launcher.launch("Notch", 16);

    let mut next_run = launcher_with_template(temp_dir.path(), "game {name}");
    let prefs = next_run.preferences().unwrap();
    assert_eq!(prefs.username, "Notch");
    assert_eq!(prefs.memory_gib, 16);
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = LauncherConfig::new(temp_dir.path()).template_file(temp_dir.path().join("missing.cmd"));

    let result = Launcher::with_process_launcher(config, RecordingLauncher::default());
    assert!(matches!(result, Err(LauncherError::ConfigError(_))));
}
