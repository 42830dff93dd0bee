//! login-probe: one scripted UI login over WebDriver, outcome via exit status.
//!
//! The probe launches a headless browser through a chromedriver endpoint,
//! navigates to a login page, fills credentials read from the environment,
//! submits the form, and confirms success by waiting for a dashboard heading
//! to appear. One attempt per invocation, no retries.
//!
//! Error variants partition into three kinds, each tied to a fixed exit code:
//! configuration/startup (1), interaction (2), everything else (3). See
//! [`error::ProbeError::exit_code`].

pub mod config;
pub mod driver;
pub mod error;
pub mod flow;
pub mod session;

pub use config::{Credentials, RunConfig};
pub use error::{ProbeError, Result};
pub use flow::run;
