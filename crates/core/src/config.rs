//! Run configuration and credential loading.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{ProbeError, Result};

/// Environment variable holding the login username.
pub const USERNAME_VAR: &str = "LOGIN_USERNAME";
/// Environment variable holding the login password.
pub const PASSWORD_VAR: &str = "LOGIN_PASSWORD";

/// Login credentials sourced from the environment.
///
/// Both variables are required; an absent or empty value fails the run before
/// any driver or network activity.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Credential loading against an injected lookup, for testing without
    /// mutating process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| match lookup(var) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ProbeError::MissingEnv(var)),
        };

        Ok(Self {
            username: required(USERNAME_VAR)?,
            password: required(PASSWORD_VAR)?,
        })
    }
}

// The password must never reach log output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything the probe needs for one run.
///
/// The target page and its selectors are configuration rather than literals;
/// the CLI supplies defaults matching the OrangeHRM demo site.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Login page URL.
    pub url: Url,
    /// `name` attribute of the username input.
    pub username_field: String,
    /// `name` attribute of the password input.
    pub password_field: String,
    /// CSS selector for the submit control.
    pub submit_selector: String,
    /// Heading text whose appearance is the sole success signal.
    pub dashboard_text: String,
    /// Bound applied to every element wait.
    pub timeout: Duration,
    pub headless: bool,
    pub window_size: (u32, u32),
    /// Attach to an already-running WebDriver server instead of spawning one.
    pub webdriver_url: Option<Url>,
    /// Explicit chromedriver binary, overriding env and PATH discovery.
    pub chromedriver: Option<PathBuf>,
}

impl RunConfig {
    pub fn username_selector(&self) -> String {
        format!("input[name='{}']", self.username_field)
    }

    pub fn password_selector(&self) -> String {
        format!("input[name='{}']", self.password_field)
    }

    pub fn dashboard_xpath(&self) -> String {
        format!("//h6[text()='{}']", self.dashboard_text)
    }
}
