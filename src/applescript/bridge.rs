use log::{debug, warn};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::email::AutomationError;

const SCRIPT_FILE_NAME: &str = "extract.applescript";
const PAYLOAD_FILE_NAME: &str = "payload.txt";

/// External-command collaborator executing a script against the mail client.
///
/// Request: the script source. Response: the text the script wrote to the
/// file whose path it receives as its first argument. The file hand-off
/// replaces stdout because the bridge's return channel mangles large or
/// non-ASCII payloads.
pub trait ScriptBridge {
    fn run(&self, script: &str) -> Result<String, AutomationError>;
}

impl<B: ScriptBridge + ?Sized> ScriptBridge for &B {
    fn run(&self, script: &str) -> Result<String, AutomationError> {
        (**self).run(script)
    }
}

/// Runs scripts through `osascript` inside a private temporary directory
pub struct OsaScriptRunner {
    program: String,
    timeout: Duration,
}

impl OsaScriptRunner {
    /// A zero `timeout` waits for the script indefinitely
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("osascript", timeout)
    }

    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        OsaScriptRunner {
            program: program.into(),
            timeout,
        }
    }

    fn invoke(&self, script_path: &Path, payload_path: &Path) -> Result<(), AutomationError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AutomationError::Invocation(format!("Unable to start process runtime: {}", e)))?;

        let result = runtime.block_on(async {
            let child = tokio::process::Command::new(&self.program)
                .arg(script_path)
                .arg(payload_path)
                .kill_on_drop(true)
                .output();

            if self.timeout.is_zero() {
                Ok(child.await)
            } else {
                tokio::time::timeout(self.timeout, child).await
            }
        });

        let output = match result {
            Err(_) => {
                return Err(AutomationError::Invocation(format!(
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs_f64()
                )))
            }
            Ok(Err(e)) => {
                return Err(AutomationError::Invocation(format!(
                    "Failed to run {}: {}",
                    self.program, e
                )))
            }
            Ok(Ok(output)) => output,
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            if stderr.is_empty() {
                return Err(AutomationError::Invocation(format!(
                    "{} failed with {}",
                    self.program, output.status
                )));
            }
            return Err(AutomationError::Invocation(stderr));
        }

        if !stderr.is_empty() {
            warn!("{} reported: {}", self.program, stderr);
        }
        Ok(())
    }
}

impl ScriptBridge for OsaScriptRunner {
    fn run(&self, script: &str) -> Result<String, AutomationError> {
        // Removed on drop, including every early return below
        let workdir = tempfile::Builder::new()
            .prefix("outlook-syncer-")
            .tempdir()
            .map_err(|e| AutomationError::Invocation(format!("Unable to create temporary directory: {}", e)))?;

        let script_path = workdir.path().join(SCRIPT_FILE_NAME);
        let payload_path = workdir.path().join(PAYLOAD_FILE_NAME);

        fs::write(&script_path, script)
            .map_err(|e| AutomationError::Invocation(format!("Unable to write script file: {}", e)))?;
        debug!("Running {} on {}", self.program, script_path.display());

        self.invoke(&script_path, &payload_path)?;

        if !payload_path.exists() {
            return Err(AutomationError::Invocation(format!(
                "{} produced no output file",
                self.program
            )));
        }

        let payload = fs::read(&payload_path)
            .map_err(|e| AutomationError::Invocation(format!("Unable to read script output: {}", e)))?;
        debug!("Script payload: {} bytes", payload.len());

        Ok(String::from_utf8_lossy(&payload).into_owned())
    }
}
