//! CLI test runner with fluent assertions.
//!
//! Executes the `cb` binary and verifies output, exit codes, and JSON
//! responses in robot mode.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::Value;

/// Test runner for the `cb` binary.
///
/// # Example
///
/// ```ignore
/// let cli = CliRunner::new();
/// cli.run(&["validate", "-c", dir])
///    .assert_success()
///    .assert_stdout_contains("Validation passed");
/// ```
pub struct CliRunner {
    binary_path: PathBuf,
    env_vars: HashMap<String, String>,
    working_dir: Option<PathBuf>,
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CliRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_cb")),
            env_vars: HashMap::new(),
            working_dir: None,
        }
    }

    /// Add an environment variable for command execution.
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Set the working directory for command execution.
    #[must_use]
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Execute the command with the given arguments.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute.
    #[must_use]
    pub fn run(&self, args: &[&str]) -> CliResult {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env_remove("CB_FORMAT")
            .env_remove("CB_CONFIG_DIR")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().expect("Failed to execute command");
        CliResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            args: args.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Execute with `--robot` flag for JSON output.
    #[must_use]
    pub fn run_robot(&self, args: &[&str]) -> CliResult {
        let mut full_args = vec!["--robot"];
        full_args.extend(args);
        self.run(&full_args)
    }
}

/// Captured output from CLI execution.
#[derive(Debug, Clone)]
pub struct CliResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub args: Vec<String>,
}

impl CliResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Assert the command succeeded.
    ///
    /// # Panics
    ///
    /// Panics if the command did not exit with code 0.
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success(),
            "Command {:?} failed with exit code {}:\nstdout:\n{}\nstderr:\n{}",
            self.args,
            self.exit_code,
            self.stdout,
            self.stderr
        );
        self
    }

    /// Assert a specific exit code.
    ///
    /// # Panics
    ///
    /// Panics if the exit code doesn't match.
    pub fn assert_exit_code(&self, expected: i32) -> &Self {
        assert_eq!(
            self.exit_code, expected,
            "Expected exit code {expected}, got {} for {:?}\nstdout:\n{}\nstderr:\n{}",
            self.exit_code, self.args, self.stdout, self.stderr
        );
        self
    }

    /// Assert stdout contains the given text.
    ///
    /// # Panics
    ///
    /// Panics if stdout doesn't contain the text.
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "stdout does not contain \"{text}\"\nActual stdout:\n{}",
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text.
    ///
    /// # Panics
    ///
    /// Panics if stderr doesn't contain the text.
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "stderr does not contain \"{text}\"\nActual stderr:\n{}",
            self.stderr
        );
        self
    }

    /// Parse every non-empty stdout line as a JSON document.
    ///
    /// Robot mode prints compact documents one per line when `--format
    /// json-compact` is used.
    ///
    /// # Panics
    ///
    /// Panics if a line is not valid JSON.
    #[must_use]
    pub fn json_lines(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("Line is not JSON ({e}): {line}"))
            })
            .collect()
    }

    /// Parse stderr as a single JSON document.
    ///
    /// # Panics
    ///
    /// Panics if stderr is not valid JSON.
    #[must_use]
    pub fn stderr_json(&self) -> Value {
        serde_json::from_str(self.stderr.trim())
            .unwrap_or_else(|e| panic!("stderr is not JSON ({e}):\n{}", self.stderr))
    }
}
