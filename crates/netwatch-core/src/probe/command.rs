// ── External command probe ──

use std::process::Stdio;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::process::Command;
use tracing::debug;

use super::Probe;
use crate::error::ProbeError;

/// Runs an external command and captures its output as display text.
///
/// Only standard output is returned. The exit status is informational:
/// `ping` exits non-zero when every packet is lost, and that output is
/// exactly what the panel should show. Standard error goes to the log.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    /// Build from an argv-style list (`["ping", "-c", "3", "8.8.8.8"]`).
    pub fn from_argv(argv: &[String]) -> Result<Self, ProbeError> {
        let (program, args) = argv.split_first().ok_or(ProbeError::EmptyCommand)?;
        if program.trim().is_empty() {
            return Err(ProbeError::EmptyCommand);
        }
        Ok(Self::new(program.clone(), args.iter().cloned()))
    }

    /// Abandon the invocation (and kill the child) after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    async fn run(&self) -> Result<String, ProbeError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child)
                .await
                .map_err(|_| ProbeError::Timeout {
                    program: self.program.clone(),
                    timeout_secs: limit.as_secs(),
                })?,
            None => child.await,
        };

        let output = result.map_err(|source| ProbeError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        debug!(
            program = %self.program,
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            "probe command finished"
        );
        if !output.stderr.is_empty() {
            debug!(
                program = %self.program,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "probe command wrote to stderr"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Probe for CommandProbe {
    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    fn invoke(&self) -> BoxFuture<'_, Result<String, ProbeError>> {
        self.run().boxed()
    }
}
