//! Example: Interactive browser shell
//!
//! Usage:
//!   cargo run --example shell -- [--url URL] [--proxy PROXY] [DOWNLOAD_DIR]

mod cli;

use browselib::error::Result;
use browselib::{BrowserHandle, Location, UploadFile, ViewState, format_size};
use cli::{find, init_tracing, parse_connection, usage_and_exit};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const USAGE: &str =
    "Usage: cargo run --example shell -- [--url URL] [--proxy PROXY] [DOWNLOAD_DIR]";

const HELP: &str = "\
Commands:
  ls                 list the current folder
  cd <name|..|/>     enter a folder, go up, or go to the root
  mkdir <name>       create a folder here
  rm <name>          delete an entry here
  put <local file>   upload a file here
  get <name>         download a file
  refresh            reload the current folder
  help               show this help
  quit               leave";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.len() > 1 {
        usage_and_exit(USAGE);
    }
    let download_dir = conn.positionals.first().cloned().unwrap_or_else(|| ".".to_string());

    let browser = conn.connect(&download_dir).await?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        let prompt = format!("{}> ", browser.state().breadcrumb_path());
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "ls" => print_listing(&browser.state()),
            _ => {
                if let Err(e) = run(&browser, cmd, arg).await {
                    eprintln!("{}", e);
                }
            }
        }
    }

    browser.shutdown().await
}

async fn run(browser: &BrowserHandle, cmd: &str, arg: &str) -> Result<()> {
    let view = browser.state();
    match cmd {
        "cd" => match arg {
            "" | "/" => {
                browser.navigate(Location::Root).await?;
            }
            ".." => {
                let parent = view.breadcrumb.iter().rev().nth(1).cloned();
                match parent {
                    Some(segment) => browser.open_segment(&segment).await?,
                    None => browser.navigate(Location::Root).await?,
                };
            }
            name => {
                browser.open(&find(&view, name)?).await?;
            }
        },
        "refresh" => {
            browser.refresh().await?;
        }
        "mkdir" => {
            browser.set_folder_name(arg).await?;
            browser.create_folder().await?;
        }
        "rm" => {
            let entry = find(&view, arg)?;
            browser.delete(&entry.id).await?;
        }
        "put" => {
            let file = UploadFile::from_path(arg).await?;
            browser.select_file(Some(file)).await?;
            browser.upload().await?;
        }
        "get" => {
            let entry = find(&view, arg)?;
            browser.download(&entry).await?;
        }
        other => {
            println!("Unknown command: {} (try help)", other);
            return Ok(());
        }
    }

    let view = browser.settled().await?;
    if let Some(message) = view.error_message() {
        eprintln!("{}", message);
    } else if cmd == "cd" || cmd == "refresh" {
        print_listing(&view);
    }
    Ok(())
}

fn print_listing(view: &ViewState) {
    if view.entries.is_empty() {
        println!("  (empty)");
    }
    for entry in &view.entries {
        let marker = if entry.is_folder() { "/" } else { "" };
        println!("  {:>10}  {}{}", format_size(entry.size), entry.name, marker);
    }
}
