use std::path::Path;
use std::process::Command;

/// Process-execution seam for the admin binary.
pub trait CommandRunner: Send + Sync + std::fmt::Debug {
    /// Runs the binary and returns its merged stdout and stderr.
    fn run(&self, binary: &Path, args: &[String]) -> std::io::Result<String>;
}

/// Runs commands via [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, binary: &Path, args: &[String]) -> std::io::Result<String> {
        let output = Command::new(binary).args(args).output()?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}
