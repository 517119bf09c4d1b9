use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::AppError;
use crate::ports::CrontabPort;

/// Production [`CrontabPort`] backed by the system `crontab` executable.
///
/// With a target user configured the invocation is elevated through sudo;
/// otherwise the crontab command runs directly for the invoking account.
#[derive(Debug, Clone)]
pub struct CrontabCommandAdapter {
    crontab: String,
    user: Option<String>,
}

impl CrontabCommandAdapter {
    pub fn new(crontab: impl Into<String>, user: Option<String>) -> Self {
        Self { crontab: crontab.into(), user }
    }

    /// The composed invocation string, used in diagnostics and errors.
    ///
    /// `sudo -u <user> <crontab>` when a target user is set, the bare
    /// crontab path otherwise.
    pub fn command_line(&self) -> String {
        match &self.user {
            Some(user) => format!("sudo -u {} {}", user, self.crontab),
            None => self.crontab.clone(),
        }
    }

    fn base_command(&self) -> Command {
        match &self.user {
            Some(user) => {
                let mut command = Command::new("sudo");
                command.args(["-u", user]).arg(&self.crontab);
                command
            }
            None => Command::new(&self.crontab),
        }
    }

    fn failure(&self, details: impl Into<String>) -> AppError {
        let details = details.into();
        AppError::Crontab {
            command: self.command_line(),
            details: if details.is_empty() { "Unknown error".to_string() } else { details },
        }
    }
}

impl CrontabPort for CrontabCommandAdapter {
    fn read(&self) -> Result<String, AppError> {
        let output =
            self.base_command().arg("-l").output().map_err(|e| self.failure(e.to_string()))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        // crontab -l exits nonzero for an account that has no crontab yet.
        if stderr.contains("no crontab for") {
            return Ok(String::new());
        }
        Err(self.failure(stderr))
    }

    fn write(&self, content: &str) -> Result<(), AppError> {
        let mut child = self
            .base_command()
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(content.as_bytes()).map_err(|e| self.failure(e.to_string()))?;
        }

        let output = child.wait_with_output().map_err(|e| self.failure(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(self.failure(stderr));
        }
        Ok(())
    }
}
