//! Example: Download a file
//!
//! Usage:
//!   cargo run --example download -- [--url URL] [--proxy PROXY] <REMOTE_PATH> [LOCAL_DIR]

mod cli;

use browselib::error::Result;
use cli::{enter, find, init_tracing, parse_connection, settle, split_parent, usage_and_exit};

const USAGE: &str = "Usage: cargo run --example download -- [--url URL] [--proxy PROXY] <REMOTE_PATH> [LOCAL_DIR]";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.is_empty() || conn.positionals.len() > 2 {
        usage_and_exit(USAGE);
    }
    let (parent, name) = split_parent(&conn.positionals[0]);
    let local_dir = conn.positionals.get(1).cloned().unwrap_or_else(|| ".".to_string());

    let browser = conn.connect(&local_dir).await?;
    let view = enter(&browser, parent).await?;
    let entry = find(&view, name)?;

    println!("Downloading {} into {}", entry.name, local_dir);
    browser.download(&entry).await?;
    settle(&browser).await?;
    println!("Download complete!");

    browser.shutdown().await
}
