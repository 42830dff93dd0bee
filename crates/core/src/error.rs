//! Error types for the login probe.

use fantoccini::error::CmdError;
use thiserror::Error;

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that can occur during a probe run.
///
/// Variants partition into three kinds, each mapped to a fixed process exit
/// code by [`ProbeError::exit_code`].
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A required credential variable is absent or empty.
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    /// No chromedriver binary could be located.
    #[error("webdriver binary not found: {0}")]
    DriverNotFound(String),

    /// The driver process or browser session could not be started.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// An expected page element did not appear within the bounded wait.
    #[error("timeout after {ms}ms waiting for: {locator}")]
    WaitTimeout { ms: u64, locator: String },

    /// An expected page element is absent.
    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },

    #[error("navigation failed: {url}")]
    Navigation {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    WebDriver(#[from] CmdError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Process exit code for this error.
    ///
    /// 1 = configuration or startup failure, detected before or while the
    /// browser comes up. 2 = interaction failure (element absent or wait
    /// elapsed). 3 = anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingEnv(_) | Self::DriverNotFound(_) | Self::BrowserLaunch(_) => 1,
            Self::WaitTimeout { .. } | Self::ElementNotFound { .. } => 2,
            Self::Navigation { .. } | Self::WebDriver(_) | Self::Io(_) => 3,
        }
    }

    /// Classify a WebDriver command error raised while acting on `locator`.
    ///
    /// Bounded waits that elapse and missing elements become interaction
    /// errors; everything else passes through unclassified.
    pub(crate) fn interaction(locator: &str, timeout_ms: u64, err: CmdError) -> Self {
        match err {
            CmdError::WaitTimeout => Self::WaitTimeout {
                ms: timeout_ms,
                locator: locator.to_string(),
            },
            e if e.is_no_such_element() => Self::ElementNotFound {
                locator: locator.to_string(),
            },
            e => Self::WebDriver(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantoccini::error::{ErrorStatus, WebDriver};

    #[test]
    fn config_errors_exit_1() {
        assert_eq!(ProbeError::MissingEnv("LOGIN_USERNAME").exit_code(), 1);
        assert_eq!(
            ProbeError::DriverNotFound("not on PATH".into()).exit_code(),
            1
        );
        assert_eq!(
            ProbeError::BrowserLaunch("connection refused".into()).exit_code(),
            1
        );
    }

    #[test]
    fn interaction_errors_exit_2() {
        let timeout = ProbeError::WaitTimeout {
            ms: 15_000,
            locator: "//h6[text()='Dashboard']".into(),
        };
        let missing = ProbeError::ElementNotFound {
            locator: "input[name='username']".into(),
        };
        assert_eq!(timeout.exit_code(), 2);
        assert_eq!(missing.exit_code(), 2);
    }

    #[test]
    fn unclassified_errors_exit_3() {
        let nav = ProbeError::Navigation {
            url: "https://example.com".into(),
            source: anyhow::anyhow!("net::ERR_CONNECTION_REFUSED"),
        };
        let io = ProbeError::Io(std::io::Error::other("boom"));
        assert_eq!(nav.exit_code(), 3);
        assert_eq!(io.exit_code(), 3);
    }

    #[test]
    fn wait_timeout_classifies_as_interaction() {
        let err = ProbeError::interaction("input[name='username']", 15_000, CmdError::WaitTimeout);
        assert!(matches!(err, ProbeError::WaitTimeout { ms: 15_000, .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_such_element_classifies_as_element_not_found() {
        let err = ProbeError::interaction(
            "input[name='username']",
            15_000,
            CmdError::Standard(WebDriver::new(
                ErrorStatus::NoSuchElement,
                "no such element: input[name='username']",
            )),
        );
        assert!(matches!(err, ProbeError::ElementNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn other_webdriver_errors_stay_unclassified() {
        let err = ProbeError::interaction(
            "button[type='submit']",
            15_000,
            CmdError::NotW3C(serde_json::Value::Null),
        );
        assert!(matches!(err, ProbeError::WebDriver(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn timeout_message_names_locator_and_bound() {
        let err = ProbeError::WaitTimeout {
            ms: 15_000,
            locator: "input[name='password']".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("15000ms"));
        assert!(msg.contains("input[name='password']"));
    }
}
