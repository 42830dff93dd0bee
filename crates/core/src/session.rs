//! Browser session over a WebDriver endpoint.
//!
//! Owns the fantoccini client and, when the probe spawned its own driver,
//! that process too. [`Session::close`] releases both; it is consumed so the
//! release happens exactly once.

use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use tracing::debug;
use url::Url;

use crate::config::RunConfig;
use crate::driver::{self, DriverProcess};
use crate::error::{ProbeError, Result};

// A freshly spawned chromedriver needs a moment to bind its port.
const CONNECT_ATTEMPTS: u32 = 20;
const CONNECT_INTERVAL: Duration = Duration::from_millis(250);

pub struct Session {
    client: Client,
    driver: Option<DriverProcess>,
    timeout: Duration,
}

impl Session {
    /// Start a browser session per the run configuration.
    ///
    /// Spawns chromedriver unless `webdriver_url` points at a running server.
    /// Any failure here is a startup error; a driver spawned along the way is
    /// shut down before returning it.
    pub async fn launch(cfg: &RunConfig) -> Result<Self> {
        let caps = chrome_capabilities(cfg);

        let (endpoint, process) = match &cfg.webdriver_url {
            Some(url) => (url.as_str().trim_end_matches('/').to_string(), None),
            None => {
                let binary = driver::resolve_binary(cfg.chromedriver.as_deref())?;
                let process = DriverProcess::spawn(&binary)?;
                (process.endpoint(), Some(process))
            }
        };

        debug!(%endpoint, "connecting WebDriver session");
        let client = match connect(&endpoint, &caps, process.is_some()).await {
            Ok(client) => client,
            Err(err) => {
                if let Some(process) = process {
                    process.shutdown().await;
                }
                return Err(err);
            }
        };

        Ok(Self {
            client,
            driver: process,
            timeout: cfg.timeout,
        })
    }

    pub async fn goto(&self, url: &Url) -> Result<()> {
        self.client
            .goto(url.as_str())
            .await
            .map_err(|e| ProbeError::Navigation {
                url: url.to_string(),
                source: anyhow::Error::new(e),
            })
    }

    /// Poll until the element is present, up to the configured timeout.
    pub async fn wait_for(&self, locator: Locator<'_>, describe: &str) -> Result<Element> {
        debug!(locator = describe, "waiting for element");
        self.client
            .wait()
            .at_most(self.timeout)
            .for_element(locator)
            .await
            .map_err(|e| self.interaction(describe, e))
    }

    /// Clear the field, then type `text` into it.
    pub async fn fill(&self, element: &Element, describe: &str, text: &str) -> Result<()> {
        element
            .clear()
            .await
            .map_err(|e| self.interaction(describe, e))?;
        element
            .send_keys(text)
            .await
            .map_err(|e| self.interaction(describe, e))
    }

    pub async fn click(&self, element: &Element, describe: &str) -> Result<()> {
        element
            .click()
            .await
            .map_err(|e| self.interaction(describe, e))
    }

    /// Delete the WebDriver session, then stop the spawned driver.
    pub async fn close(self) -> Result<()> {
        let Session { client, driver, .. } = self;
        let closed = client.close().await;
        if let Some(process) = driver {
            process.shutdown().await;
        }
        closed.map_err(ProbeError::from)
    }

    fn interaction(&self, locator: &str, err: CmdError) -> ProbeError {
        ProbeError::interaction(locator, self.timeout.as_millis() as u64, err)
    }
}

async fn connect(endpoint: &str, caps: &Capabilities, freshly_spawned: bool) -> Result<Client> {
    let attempts = if freshly_spawned { CONNECT_ATTEMPTS } else { 1 };
    let mut last_err = None;

    for attempt in 0..attempts {
        if attempt > 0 {
            tokio::time::sleep(CONNECT_INTERVAL).await;
        }
        let mut builder = ClientBuilder::rustls()
            .map_err(|e| ProbeError::BrowserLaunch(e.to_string()))?;
        match builder.capabilities(caps.clone()).connect(endpoint).await {
            Ok(client) => return Ok(client),
            Err(e) => last_err = Some(e),
        }
    }

    Err(ProbeError::BrowserLaunch(match last_err {
        Some(e) => e.to_string(),
        None => format!("no session established at {endpoint}"),
    }))
}

fn chrome_capabilities(cfg: &RunConfig) -> Capabilities {
    let mut args = Vec::new();
    if cfg.headless {
        args.push("--headless".to_string());
    }
    args.push("--no-sandbox".to_string());
    args.push("--disable-dev-shm-usage".to_string());
    args.push(format!(
        "--window-size={},{}",
        cfg.window_size.0, cfg.window_size.1
    ));

    let mut caps = Capabilities::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        serde_json::json!({ "args": args }),
    );
    caps
}
