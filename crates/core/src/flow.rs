//! The login flow: one linear pass from navigation to dashboard confirmation.

use fantoccini::Locator;
use tracing::info;

use crate::config::{Credentials, RunConfig};
use crate::error::Result;
use crate::session::Session;

/// Perform one login attempt end to end.
///
/// Credentials are validated before any driver or network activity. The
/// session is closed on every path; the flow outcome takes precedence over a
/// close failure.
pub async fn run(cfg: &RunConfig) -> Result<()> {
    let creds = Credentials::from_env()?;

    let session = Session::launch(cfg).await?;
    let outcome = login(&session, cfg, &creds).await;
    let closed = session.close().await;

    outcome?;
    closed
}

async fn login(session: &Session, cfg: &RunConfig, creds: &Credentials) -> Result<()> {
    info!(url = %cfg.url, "navigating to login page");
    session.goto(&cfg.url).await?;

    let username_selector = cfg.username_selector();
    let password_selector = cfg.password_selector();
    let dashboard_xpath = cfg.dashboard_xpath();

    let username = session
        .wait_for(Locator::Css(&username_selector), &username_selector)
        .await?;
    let password = session
        .wait_for(Locator::Css(&password_selector), &password_selector)
        .await?;
    let submit = session
        .wait_for(Locator::Css(&cfg.submit_selector), &cfg.submit_selector)
        .await?;

    session
        .fill(&username, &username_selector, &creds.username)
        .await?;
    session
        .fill(&password, &password_selector, &creds.password)
        .await?;

    info!("submitting login form");
    session.click(&submit, &cfg.submit_selector).await?;

    // The dashboard heading is the sole success signal.
    session
        .wait_for(Locator::XPath(&dashboard_xpath), &dashboard_xpath)
        .await?;
    info!("Login successful. Dashboard loaded.");

    Ok(())
}
