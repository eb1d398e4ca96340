//! GitHub Actions step outputs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Destination for step outputs.
///
/// Outputs are appended as `name=value` lines to the file named by
/// `GITHUB_OUTPUT`. Without it they are printed as `::set-output` commands.
#[derive(Debug, Clone)]
pub struct ActionOutput {
    file: Option<PathBuf>,
}

impl ActionOutput {
    /// Use `GITHUB_OUTPUT` when it is set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var_os("GITHUB_OUTPUT").filter(|value| !value.is_empty()) {
            Some(path) => Self::to_file(path),
            None => Self::stdout(),
        }
    }

    /// Append outputs to a specific file.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    /// Print outputs as workflow commands.
    pub fn stdout() -> Self {
        Self { file: None }
    }

    /// Set one output.
    pub fn set(&self, name: &str, value: impl std::fmt::Display) -> io::Result<()> {
        match &self.file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", name, value)
            }
            None => {
                println!("::set-output name={}::{}", name, value);
                Ok(())
            }
        }
    }
}
