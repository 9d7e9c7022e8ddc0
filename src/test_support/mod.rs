//! Test utilities and mocks for unit tests.
//!
//! [`MockExecutor`] stands in for real child processes: it answers commands
//! from a list of expectations and records every call, which makes it the spy
//! for "was git invoked?" and "what did the compiler receive?" assertions.
//!
//! # Example
//!
//! ```rust,ignore
//! use cargo_for_c::test_support::{MockExecutor, MockProcessOutput};
//!
//! let mut exec = MockExecutor::new();
//! exec.expect_prefix("git clone", MockProcessOutput::success(""));
//! // ... run an operation with `&mut exec` as its ProcessRunner ...
//! assert_eq!(exec.calls().len(), 1);
//! ```

pub mod fixtures;

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::util::process::{ProcessBuilder, ProcessOutput, ProcessRunner};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

impl From<MockProcessOutput> for ProcessOutput {
    fn from(mock: MockProcessOutput) -> Self {
        ProcessOutput {
            code: Some(mock.status),
            stdout: mock.stdout,
            stderr: mock.stderr,
        }
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
struct CommandExpectation {
    pattern: CommandPattern,
    output: MockProcessOutput,
}

/// Mock process executor for testing command execution.
///
/// Expectations are tried in insertion order; the first match wins.
#[derive(Debug, Default)]
pub struct MockExecutor {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
    commands: Vec<ProcessBuilder>,
    default_output: Option<MockProcessOutput>,
    create_clone_dirs: bool,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandPattern::StartsWith(prefix.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandPattern::Contains(substring.to_string()), output)
    }

    /// Add an expectation with a custom pattern.
    pub fn expect_pattern(
        &mut self,
        pattern: CommandPattern,
        output: MockProcessOutput,
    ) -> &mut Self {
        self.expectations
            .push(CommandExpectation { pattern, output });
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.default_output = Some(output);
        self
    }

    /// Make successful `clone` commands create their destination directory,
    /// like a real clone would.
    pub fn create_clone_dirs(&mut self) -> &mut Self {
        self.create_clone_dirs = true;
        self
    }

    fn run(&mut self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        let full_cmd = cmd.display_command();
        self.calls.push(full_cmd.clone());
        self.commands.push(cmd.clone());

        let output = self
            .expectations
            .iter()
            .find(|exp| exp.pattern.matches(&full_cmd))
            .map(|exp| exp.output.clone())
            .or_else(|| self.default_output.clone());

        let Some(output) = output else {
            bail!("unexpected command: {}", full_cmd)
        };

        if self.create_clone_dirs && output.status == 0 {
            let args = cmd.get_args();
            if args.first().map(String::as_str) == Some("clone") {
                if let Some(dest) = args.last() {
                    std::fs::create_dir_all(PathBuf::from(dest))?;
                }
            }
        }

        Ok(output.into())
    }

    /// Get all commands that were called, as display strings.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Get all commands that were called.
    pub fn commands(&self) -> &[ProcessBuilder] {
        &self.commands
    }

    /// Count calls whose display string contains `substring`.
    pub fn count_containing(&self, substring: &str) -> usize {
        self.calls.iter().filter(|c| c.contains(substring)).count()
    }
}

impl ProcessRunner for MockExecutor {
    fn output(&mut self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        self.run(cmd)
    }

    fn status(&mut self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        let mut output = self.run(cmd)?;
        // Inherited stdio is not captured.
        output.stdout.clear();
        output.stderr.clear();
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_matches_in_order() {
        let mut exec = MockExecutor::new();
        exec.expect("git --version", MockProcessOutput::success("git version 2.44"))
            .expect_prefix("git", MockProcessOutput::failure(1, "nope"));

        let out = exec.output(&ProcessBuilder::new("git").arg("--version")).unwrap();
        assert_eq!(out.stdout, "git version 2.44");

        let out = exec.output(&ProcessBuilder::new("git").arg("status")).unwrap();
        assert_eq!(out.code, Some(1));

        assert_eq!(exec.calls(), &["git --version", "git status"]);
    }

    #[test]
    fn test_mock_executor_unexpected_command() {
        let mut exec = MockExecutor::new();
        assert!(exec.output(&ProcessBuilder::new("cc")).is_err());

        exec.set_default(MockProcessOutput::success(""));
        assert!(exec.output(&ProcessBuilder::new("cc")).unwrap().success());
    }

    #[test]
    fn test_mock_executor_status_drops_captured_output() {
        let mut exec = MockExecutor::new();
        exec.expect_contains("main.c", MockProcessOutput::failure(1, "error: x"));

        let out = exec
            .status(&ProcessBuilder::new("cc").arg("src/main.c"))
            .unwrap();
        assert_eq!(out.code, Some(1));
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_create_clone_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dest = tmp.path().join("host/a");

        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""))
            .create_clone_dirs();
        exec.output(&ProcessBuilder::new("git").args(["clone", "http://host/a"]).arg(&dest))
            .unwrap();

        assert!(dest.is_dir());
        assert_eq!(exec.count_containing("clone"), 1);
    }
}
