pub mod error;

pub use error::{LauncherError, Result};
