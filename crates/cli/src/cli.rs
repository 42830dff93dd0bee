use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use probe::RunConfig;
use url::Url;

/// Login page the probe targets when no `--url` is given.
pub const DEFAULT_LOGIN_URL: &str =
    "https://opensource-demo.orangehrmlive.com/web/index.php/auth/login";

#[derive(Parser, Debug)]
#[command(name = "probe")]
#[command(about = "Scripted UI login check - drives a headless browser through a login form")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Login page URL
    #[arg(long, default_value = DEFAULT_LOGIN_URL, value_name = "URL")]
    pub url: Url,

    /// Name attribute of the username input
    #[arg(long, default_value = "username", value_name = "NAME")]
    pub username_field: String,

    /// Name attribute of the password input
    #[arg(long, default_value = "password", value_name = "NAME")]
    pub password_field: String,

    /// CSS selector for the submit control
    #[arg(long, default_value = "button[type='submit']", value_name = "SELECTOR")]
    pub submit_selector: String,

    /// Heading text that confirms a successful login
    #[arg(long, default_value = "Dashboard", value_name = "TEXT")]
    pub dashboard_text: String,

    /// Bound applied to every element wait, in seconds
    #[arg(long, default_value_t = 15, value_name = "SECS")]
    pub timeout: u64,

    /// Browser window size
    #[arg(long, default_value = "1920x1080", value_name = "WxH", value_parser = parse_window_size)]
    pub window_size: (u32, u32),

    /// Run with a visible browser window
    #[arg(long)]
    pub headful: bool,

    /// Connect to an already-running WebDriver server instead of spawning chromedriver
    #[arg(long, value_name = "URL")]
    pub webdriver_url: Option<Url>,

    /// Path to the chromedriver binary (overrides CHROMEDRIVER and PATH lookup)
    #[arg(long, value_name = "PATH")]
    pub chromedriver: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            url: self.url,
            username_field: self.username_field,
            password_field: self.password_field,
            submit_selector: self.submit_selector,
            dashboard_text: self.dashboard_text,
            timeout: Duration::from_secs(self.timeout),
            headless: !self.headful,
            window_size: self.window_size,
            webdriver_url: self.webdriver_url,
            chromedriver: self.chromedriver,
        }
    }
}

fn parse_window_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.parse().map_err(|_| format!("invalid width in '{s}'"))?;
    let h = h.parse().map_err(|_| format!("invalid height in '{s}'"))?;
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_site() {
        let cli = Cli::try_parse_from(["probe"]).unwrap();
        let cfg = cli.into_config();

        assert_eq!(cfg.url.as_str(), DEFAULT_LOGIN_URL);
        assert_eq!(cfg.username_field, "username");
        assert_eq!(cfg.password_field, "password");
        assert_eq!(cfg.submit_selector, "button[type='submit']");
        assert_eq!(cfg.dashboard_text, "Dashboard");
        assert_eq!(cfg.timeout, Duration::from_secs(15));
        assert_eq!(cfg.window_size, (1920, 1080));
        assert!(cfg.headless);
        assert!(cfg.webdriver_url.is_none());
        assert!(cfg.chromedriver.is_none());
    }

    #[test]
    fn selectors_and_timeout_are_configurable() {
        let cli = Cli::try_parse_from([
            "probe",
            "--url",
            "https://login.example.com/",
            "--username-field",
            "user",
            "--password-field",
            "pass",
            "--submit-selector",
            "input[type='submit']",
            "--dashboard-text",
            "Home",
            "--timeout",
            "30",
        ])
        .unwrap();
        let cfg = cli.into_config();

        assert_eq!(cfg.url.as_str(), "https://login.example.com/");
        assert_eq!(cfg.username_selector(), "input[name='user']");
        assert_eq!(cfg.password_selector(), "input[name='pass']");
        assert_eq!(cfg.submit_selector, "input[type='submit']");
        assert_eq!(cfg.dashboard_xpath(), "//h6[text()='Home']");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn headful_flag_turns_headless_off() {
        let cli = Cli::try_parse_from(["probe", "--headful"]).unwrap();
        assert!(!cli.into_config().headless);
    }

    #[test]
    fn window_size_parses_and_rejects_garbage() {
        let cli = Cli::try_parse_from(["probe", "--window-size", "1280x720"]).unwrap();
        assert_eq!(cli.window_size, (1280, 720));

        assert!(Cli::try_parse_from(["probe", "--window-size", "wide"]).is_err());
        assert!(Cli::try_parse_from(["probe", "--window-size", "1280x"]).is_err());
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(Cli::try_parse_from(["probe", "--url", "not a url"]).is_err());
    }

    #[test]
    fn verbose_flag_counts() {
        assert_eq!(Cli::try_parse_from(["probe", "-v"]).unwrap().verbose, 1);
        assert_eq!(Cli::try_parse_from(["probe", "-vv"]).unwrap().verbose, 2);
    }

    #[test]
    fn webdriver_url_attaches_instead_of_spawning() {
        let cli =
            Cli::try_parse_from(["probe", "--webdriver-url", "http://localhost:9515"]).unwrap();
        let cfg = cli.into_config();
        assert_eq!(
            cfg.webdriver_url.unwrap().as_str(),
            "http://localhost:9515/"
        );
    }
}
