mod cli;

use browselib::error::Result;
use cli::{enter, find, init_tracing, parse_connection, settle, split_parent, usage_and_exit};

const USAGE: &str = "Usage: cargo run --example rm -- [--url URL] [--proxy PROXY] <PATH>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.len() != 1 {
        usage_and_exit(USAGE);
    }
    let (parent, name) = split_parent(&conn.positionals[0]);

    let browser = conn.connect(".").await?;
    let view = enter(&browser, parent).await?;
    let entry = find(&view, name)?;

    println!("Removing: {}", entry.name);
    browser.delete(&entry.id).await?;
    match settle(&browser).await {
        Ok(_) => println!("Removed successfully!"),
        Err(e) => eprintln!("{}", e),
    }

    browser.shutdown().await
}
