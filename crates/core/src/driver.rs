//! Chromedriver discovery and process lifecycle.
//!
//! The binary is located in priority order: explicit path from configuration,
//! the `CHROMEDRIVER` environment variable, then `chromedriver` on `PATH`.
//! A spawned driver listens on a freshly allocated loopback port and is
//! killed when the session closes; `kill_on_drop` covers every other path.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::debug;

use crate::error::{ProbeError, Result};

/// Environment variable naming the chromedriver binary.
pub const DRIVER_ENV: &str = "CHROMEDRIVER";

/// Locate the chromedriver binary.
pub fn resolve_binary(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(ProbeError::DriverNotFound(format!(
            "{} does not exist",
            path.display()
        )));
    }

    if let Ok(path) = std::env::var(DRIVER_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ProbeError::DriverNotFound(format!(
            "{DRIVER_ENV} points to {}, which does not exist",
            path.display()
        )));
    }

    which::which("chromedriver").map_err(|e| ProbeError::DriverNotFound(e.to_string()))
}

/// Ask the OS for a free loopback port.
fn free_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

/// A spawned chromedriver process bound to a local port.
#[derive(Debug)]
pub struct DriverProcess {
    child: Child,
    port: u16,
}

impl DriverProcess {
    pub fn spawn(binary: &Path) -> Result<Self> {
        let port = free_port()?;
        debug!(binary = %binary.display(), port, "starting chromedriver");

        let child = Command::new(binary)
            .arg(format!("--port={port}"))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ProbeError::BrowserLaunch(format!("failed to start {}: {e}", binary.display()))
            })?;

        Ok(Self { child, port })
    }

    /// HTTP endpoint the driver serves WebDriver on.
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Kill the driver process and reap it.
    pub async fn shutdown(mut self) {
        let _ = self.child.start_kill();
        let _ = self.child.wait().await;
    }
}
