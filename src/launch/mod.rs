pub mod builder;
pub mod process;
pub mod sanitize;
pub mod template;

pub use builder::{LaunchCommandBuilder, LaunchOutcome, LaunchReport};
pub use process::{ProcessLauncher, SystemLauncher};
pub use sanitize::sanitize_identity;
pub use template::{CommandTemplate, RenderedCommand, TemplateSource, TemplateValues};
