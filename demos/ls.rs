//! Example: List a folder
//!
//! Usage:
//!   cargo run --example ls -- [--url URL] [--proxy PROXY] [PATH]

mod cli;

use browselib::error::Result;
use browselib::format_size;
use cli::{enter, init_tracing, parse_connection, usage_and_exit};

const USAGE: &str = "Usage: cargo run --example ls -- [--url URL] [--proxy PROXY] [PATH]";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.len() > 1 {
        usage_and_exit(USAGE);
    }
    let path = conn.positionals.first().cloned().unwrap_or_default();

    let browser = conn.connect(".").await?;
    let view = enter(&browser, &path).await?;

    println!("\n{}\n", view.breadcrumb_path());
    if view.entries.is_empty() {
        println!("  (empty)");
    }
    for entry in &view.entries {
        let kind = if entry.is_folder() { "dir " } else { "file" };
        println!("  {} {:>10}  {}", kind, format_size(entry.size), entry.name);
    }

    browser.shutdown().await
}
