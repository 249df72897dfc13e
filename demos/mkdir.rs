mod cli;

use browselib::error::Result;
use cli::{enter, init_tracing, parse_connection, settle, split_parent, usage_and_exit};

const USAGE: &str = "Usage: cargo run --example mkdir -- [--url URL] [--proxy PROXY] <PATH>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.len() != 1 {
        usage_and_exit(USAGE);
    }
    let (parent, name) = split_parent(&conn.positionals[0]);

    let browser = conn.connect(".").await?;
    enter(&browser, parent).await?;

    println!("Creating directory: {}", name);
    browser.set_folder_name(name).await?;
    browser.create_folder().await?;
    match settle(&browser).await {
        Ok(view) => {
            println!("Directory created successfully!");
            if let Some(entry) = view.entry_named(name.trim()) {
                println!("Id: {}", entry.id);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
        }
    }

    browser.shutdown().await
}
