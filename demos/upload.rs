mod cli;

use std::process;

use browselib::UploadFile;
use browselib::error::Result;
use cli::{enter, init_tracing, parse_connection, settle, usage_and_exit};

const USAGE: &str =
    "Usage: cargo run --example upload -- [--url URL] [--proxy PROXY] <LOCAL_FILE> [REMOTE_FOLDER]";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.is_empty() || conn.positionals.len() > 2 {
        usage_and_exit(USAGE);
    }
    let local_file = &conn.positionals[0];
    let remote = conn.positionals.get(1).map(String::as_str).unwrap_or("");

    let file = UploadFile::from_path(local_file).await?;
    let browser = conn.connect(".").await?;
    let view = enter(&browser, remote).await?;

    println!("Uploading {} ({} bytes) to {}...", file.file_name, file.len(), view.breadcrumb_path());
    browser.select_file(Some(file)).await?;
    browser.upload().await?;
    match settle(&browser).await {
        Ok(view) => {
            println!("Upload complete! {} entries in folder", view.entries.len());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    browser.shutdown().await
}
