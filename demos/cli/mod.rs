#![allow(dead_code)] // Each example uses a subset of the helpers.

use std::env;
use std::process;
use std::time::Duration;

use browselib::error::{BrowseError, Result};
use browselib::{BrowserHandle, ClientConfig, Entry, Location, ViewState};
use tracing_subscriber::{EnvFilter, fmt};

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("browselib=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                let value = self.args.get(i + 1).cloned();
                if value.is_none() {
                    usage_and_exit(self.usage);
                }
                self.args.drain(i..=i + 1);
                return value;
            }
            i += 1;
        }
        None
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

/// Service settings from the environment, overridden by flags.
pub struct Connection {
    pub config: ClientConfig,
    pub positionals: Vec<String>,
}

pub fn parse_connection(usage: &'static str) -> Connection {
    let mut parser = ArgParser::new(usage);
    let mut config = ClientConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        usage_and_exit(usage)
    });

    if let Some(url) = parser.take_value(&["--url", "-u"]) {
        config = ClientConfig {
            base_url: ClientConfig::new(url).base_url,
            ..config
        };
    }
    if let Some(proxy) = parser.take_value(&["--proxy"]) {
        config = config.with_proxy(proxy);
    }
    if let Some(secs) = parser.take_value(&["--timeout"]) {
        let secs: u64 = secs.parse().unwrap_or_else(|_| usage_and_exit(usage));
        config = config.with_timeout(Duration::from_secs(secs));
    }

    Connection {
        config,
        positionals: parser.remaining(),
    }
}

impl Connection {
    /// Start a browser that saves downloads into `download_dir`.
    pub async fn connect(&self, download_dir: &str) -> Result<BrowserHandle> {
        println!("Connecting to {}...", self.config.base_url);
        let browser = BrowserHandle::connect(self.config.clone(), download_dir)?;
        settle(&browser).await?;
        Ok(browser)
    }
}

/// Wait for outstanding requests and surface the error slot as an error.
pub async fn settle(browser: &BrowserHandle) -> Result<ViewState> {
    let view = browser.settled().await?;
    match &view.error {
        Some(message) => Err(BrowseError::Custom(message.clone())),
        None => Ok(view),
    }
}

/// Walk a `/`-separated folder path from the root by name.
pub async fn enter(browser: &BrowserHandle, path: &str) -> Result<ViewState> {
    browser.navigate(Location::Root).await?;
    let mut view = settle(browser).await?;

    for name in path.split('/').filter(|s| !s.is_empty()) {
        let folder = find(&view, name)?;
        if !folder.is_folder() {
            return Err(BrowseError::Custom(format!("Not a folder: {}", name)));
        }
        browser.open(&folder).await?;
        view = settle(browser).await?;
    }

    Ok(view)
}

/// Split `/a/b/c.txt` into `/a/b` and `c.txt`.
pub fn split_parent(path: &str) -> (&str, &str) {
    let path = path.trim_end_matches('/');
    match path.rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => ("", path),
    }
}

pub fn find(view: &ViewState, name: &str) -> Result<Entry> {
    view.entry_named(name)
        .cloned()
        .ok_or_else(|| BrowseError::Custom(format!("Not found: {}", name)))
}
