//! Command templates and their rendering.
//!
//! A template is plain text holding three placeholders:
//!
//! - `{name}` → sanitized player name
//! - `{ram}` → memory allocation in GiB
//! - `%cd%` → absolute working directory
//!
//! Anything else, including unknown `{...}` tokens, is copied verbatim.

use crate::core::{LauncherError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const IDENTITY_PLACEHOLDER: &str = "{name}";
pub const MEMORY_PLACEHOLDER: &str = "{ram}";
pub const WORKDIR_PLACEHOLDER: &str = "%cd%";

const BUNDLED_TEMPLATE: &str = include_str!("../../resources/launch.cmd");

// ============================================================================
// Template Source
// ============================================================================

/// Where the command template is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// Template compiled into the binary.
    #[default]
    Bundled,
    /// Template read from disk on every launch.
    File(PathBuf),
}

impl TemplateSource {
    pub fn load(&self) -> Result<CommandTemplate> {
        match self {
            TemplateSource::Bundled => Ok(CommandTemplate::new(BUNDLED_TEMPLATE)),
            TemplateSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    LauncherError::TemplateError(format!(
                        "Failed to read template '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(CommandTemplate::new(text))
            }
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Bundled => write!(f, "<bundled>"),
            TemplateSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateValues<'a> {
    pub identity: &'a str,
    pub memory_gib: u32,
    pub working_dir: &'a Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    text: String,
}

impl CommandTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute every placeholder occurrence.
    ///
    /// The argument vector is built by splitting the template on whitespace
    /// first and substituting inside each token, so a value containing spaces
    /// stays within the argument it was written in.
    pub fn render(&self, values: &TemplateValues<'_>) -> RenderedCommand {
        let memory = values.memory_gib.to_string();
        let working_dir = values.working_dir.to_string_lossy();
        let replacements = [
            (IDENTITY_PLACEHOLDER, values.identity),
            (MEMORY_PLACEHOLDER, memory.as_str()),
            (WORKDIR_PLACEHOLDER, &*working_dir),
        ];

        let line = substitute(self.text.trim_end(), &replacements);
        let argv = self
            .text
            .split_whitespace()
            .map(|token| substitute(token, &replacements))
            .collect();

        RenderedCommand { line, argv }
    }
}

/// Single left-to-right pass; substituted text is never scanned again.
fn substitute(input: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    'scan: while !rest.is_empty() {
        for (placeholder, value) in replacements {
            if let Some(tail) = rest.strip_prefix(placeholder) {
                out.push_str(value);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// A fully substituted command, ready to hand to a process launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    line: String,
    argv: Vec<String>,
}

impl RenderedCommand {
    /// The command as a single line of text.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

impl fmt::Display for RenderedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn values<'a>(identity: &'a str, memory_gib: u32, working_dir: &'a Path) -> TemplateValues<'a> {
        TemplateValues {
            identity,
            memory_gib,
            working_dir,
        }
    }

    #[test]
    fn test_render_all_placeholders() {
        let template = CommandTemplate::new("run --user={name} --mem={ram}g --dir=%cd%");
        let rendered = template.render(&values("alice", 8, Path::new("/opt/app")));

        assert_eq!(rendered.line(), "run --user=alice --mem=8g --dir=/opt/app");
        assert_eq!(
            rendered.argv(),
            &["run", "--user=alice", "--mem=8g", "--dir=/opt/app"]
        );
    }

    #[test]
    fn test_render_repeated_placeholders() {
        let template = CommandTemplate::new("%cd%/bin/game --root %cd% --name {name} --alias {name}");
        let rendered = template.render(&values("bob", 4, Path::new("/srv")));

        assert_eq!(
            rendered.line(),
            "/srv/bin/game --root /srv --name bob --alias bob"
        );
    }

    #[test]
    fn test_unknown_placeholders_untouched() {
        let template = CommandTemplate::new("run {name} {uuid} %APPDATA% {ram");
        let rendered = template.render(&values("eve", 2, Path::new("/tmp")));

        assert_eq!(rendered.line(), "run eve {uuid} %APPDATA% {ram");
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        let template = CommandTemplate::new("run --dir=%cd% --user={name}");
        let rendered = template.render(&values("x", 1, Path::new("/home/{name}/%cd%")));

        assert_eq!(rendered.line(), "run --dir=/home/{name}/%cd% --user=x");
    }

    #[test]
    fn test_workdir_with_spaces_stays_one_argument() {
        let template = CommandTemplate::new("java -cp %cd%/client.jar Main");
        let rendered = template.render(&values("x", 1, Path::new("/home/me/My Games")));

        assert_eq!(rendered.line(), "java -cp /home/me/My Games/client.jar Main");
        assert_eq!(
            rendered.argv(),
            &["java", "-cp", "/home/me/My Games/client.jar", "Main"]
        );
    }

    #[test]
    fn test_multiline_template() {
        let template = CommandTemplate::new("java -Xmx{ram}G\n  Main --username {name}\n");
        let rendered = template.render(&values("steve", 6, Path::new("/")));

        assert_eq!(rendered.line(), "java -Xmx6G\n  Main --username steve");
        assert_eq!(rendered.argv(), &["java", "-Xmx6G", "Main", "--username", "steve"]);
    }

    #[test]
    fn test_empty_template() {
        let rendered = CommandTemplate::new("  \n").render(&values("a", 1, Path::new("/")));
        assert!(rendered.is_empty());
        assert_eq!(rendered.line(), "");
    }

    #[test]
    fn test_bundled_template_has_placeholders() {
        let template = TemplateSource::Bundled.load().unwrap();
        assert!(template.text().contains(IDENTITY_PLACEHOLDER));
        assert!(template.text().contains(MEMORY_PLACEHOLDER));
        assert!(template.text().contains(WORKDIR_PLACEHOLDER));
    }

    #[test]
    fn test_file_template_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("launch.cmd");
        std::fs::write(&path, "echo {name}\n").unwrap();

        let template = TemplateSource::File(path).load().unwrap();
        assert_eq!(template.text(), "echo {name}\n");
    }

    #[test]
    fn test_missing_template_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = TemplateSource::File(temp_dir.path().join("nope.cmd"))
            .load()
            .unwrap_err();
        assert!(matches!(err, LauncherError::TemplateError(_)));
    }
}
