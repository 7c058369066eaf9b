//! External command execution.
//!
//! Thin builder over [`std::process::Command`] used for every tool espenv
//! invokes. Two modes: [`Cmd::run`] captures output (for probing and
//! parsing), [`Cmd::run_streamed`] inherits stdio (for the build itself, so
//! the build tool's own output reaches the user unfiltered).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Builder for an external command invocation.
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    allow_fail: bool,
    error_msg: Option<String>,
}

/// Captured result of a [`Cmd::run`].
#[derive(Debug)]
pub struct CmdOutput {
    /// Process exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured stdout, lossily decoded.
    pub stdout: String,
    /// Captured stderr, lossily decoded.
    pub stderr: String,
}

impl CmdOutput {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl Cmd {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            allow_fail: false,
            error_msg: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.display().to_string());
        self
    }

    /// Run the command from `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Don't treat a non-zero exit status as an error; the caller inspects
    /// [`CmdOutput::success`] instead.
    pub fn allow_fail(mut self) -> Self {
        self.allow_fail = true;
        self
    }

    /// Message used when the command fails (typically an install hint).
    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    /// Run the command, capturing stdout and stderr.
    pub fn run(self) -> Result<CmdOutput> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let output = command
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to run '{}'", self.program))?;

        let result = CmdOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success() && !self.allow_fail {
            return Err(self.failure_error(result.code, &result.stderr));
        }

        Ok(result)
    }

    /// Run the command with inherited stdio.
    ///
    /// Returns the exit code; non-zero is an error unless `allow_fail` is
    /// set. Used for the clean/build steps where the tool's own output is
    /// the user interface.
    pub fn run_streamed(self) -> Result<i32> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .with_context(|| format!("failed to run '{}'", self.program))?;

        let code = status.code().unwrap_or(-1);
        if !status.success() && !self.allow_fail {
            return Err(self.failure_error(Some(code), ""));
        }
        Ok(code)
    }

    fn failure_error(&self, code: Option<i32>, stderr: &str) -> anyhow::Error {
        let mut msg = match &self.error_msg {
            Some(custom) => custom.clone(),
            None => format!(
                "'{} {}' failed with status {:?}",
                self.program,
                self.args.join(" "),
                code
            ),
        };
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            msg.push_str("\nstderr:\n");
            msg.push_str(stderr);
        }
        anyhow::anyhow!(msg)
    }
}

/// Find a tool on PATH, returning its full path.
pub fn which(tool: &str) -> Option<String> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        let candidate = dir.join(tool);
        if is_executable(&candidate) {
            return Some(candidate.display().to_string());
        }
    }
    None
}

/// Check if a tool is available on PATH.
pub fn exists(tool: &str) -> bool {
    which(tool).is_some()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
