use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::stream::redact_secrets;

/// Decides whether a stream endpoint is currently serving media.
///
/// Probing is advisory: implementations report every failure as "not active"
/// instead of returning an error.
#[async_trait]
pub trait LivenessChecker: Send + Sync {
    async fn is_active(&self, url: &str) -> bool;
}

/// Probes streams by running ffprobe (or a compatible tool) against the URL.
pub struct FfprobeChecker {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl FfprobeChecker {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Run `<program> -version` to see whether the tool can be launched at all.
    pub async fn check_available(&self) -> bool {
        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(self.timeout, status).await {
            Ok(Ok(status)) if status.success() => {
                info!("Probe tool '{}' is available", self.program);
                true
            }
            Ok(Ok(status)) => {
                warn!("Probe tool '{}' -version exited with {}", self.program, status);
                false
            }
            Ok(Err(e)) => {
                warn!(
                    "Probe tool '{}' cannot be started: {}; every stream will report inactive",
                    self.program, e
                );
                false
            }
            Err(_) => {
                warn!("Probe tool '{}' -version timed out", self.program);
                false
            }
        }
    }
}

#[async_trait]
impl LivenessChecker for FfprobeChecker {
    async fn is_active(&self, url: &str) -> bool {
        let shown = redact_secrets(url);
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        // Dropping the pending future on timeout kills the child
        match tokio::time::timeout(self.timeout, status).await {
            Ok(Ok(status)) => {
                debug!("Probe of {} exited with {}", shown, status);
                status.success()
            }
            Ok(Err(e)) => {
                warn!("Failed to run '{}' for {}: {}", self.program, shown, e);
                false
            }
            Err(_) => {
                debug!("Probe of {} timed out after {:?}", shown, self.timeout);
                false
            }
        }
    }
}
