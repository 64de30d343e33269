//! daylog - append log entries to today's Markdown daily note
//!
//! Usage:
//!   daylog                      Prompt for one manual entry
//!   daylog add <TEXT>...        Add a manual entry
//!   daylog serve [--port N]     Serve GET /log on localhost
//!   daylog pending [--clear]    Show or drop cached entries
//!   daylog config [--init]      Show or create the config file

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use daylog::cache::JsonFileStore;
use daylog::config::{self, Config};
use daylog::error::DaylogError;
use daylog::journal::{Journal, LogEntryOptions};
use daylog::server;
use daylog::{logging, DailyNotes, LogSource};
use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };

    match cli.command.unwrap_or_else(Command::prompt) {
        Command::Add { text, api, json } => {
            let config = load_config(&config_path)?;
            run_add(&config, text, api, json)
        }
        Command::Serve { port } => {
            let config = load_config(&config_path)?;
            run_serve(&config, port.unwrap_or(config.server.port))
        }
        Command::Pending { clear } => {
            let config = load_config(&config_path)?;
            run_pending(&config, clear)
        }
        Command::Config { init, force } => run_config(&config_path, init, force),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let config = config::load(path);
    config.validate()?;
    Ok(config)
}

fn journal_for(config: &Config) -> Result<Journal<DailyNotes, JsonFileStore>> {
    Ok(Journal::new(
        config.notes.daily_notes(),
        config.open_cache()?,
        config.log.to_settings(),
    ))
}

// ============================================================================
// Commands
// ============================================================================

fn run_add(config: &Config, words: Vec<String>, api: bool, json: bool) -> Result<()> {
    let text = if words.is_empty() {
        prompt_entry()?
    } else {
        words.join(" ")
    };
    let text = text.trim();
    if text.is_empty() {
        eprintln!("Nothing to log");
        return Ok(());
    }

    let source = if api { LogSource::Api } else { LogSource::Manual };
    let mut journal = journal_for(config)?;
    let result = journal.add_log_entry(text, Some(&LogEntryOptions::with_source(source)));

    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else if result.cached {
        println!("No daily note yet, entry cached for later");
    } else if result.success {
        println!("Logged to {}", config.notes.daily_notes().today_path().display());
    }

    if !result.success {
        bail!(result.message.unwrap_or_else(|| "Unknown error".to_string()));
    }
    Ok(())
}

fn prompt_entry() -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "Log entry: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read entry from stdin")?;
    Ok(line)
}

fn run_serve(config: &Config, port: u16) -> Result<()> {
    let journal = Arc::new(Mutex::new(journal_for(config)?));
    let listener = server::bind_listener(port)?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| DaylogError::Runtime { source: e })?;
    rt.block_on(async move {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
            shutdown_clone.store(true, Ordering::SeqCst);
        });

        eprintln!("Listening on http://127.0.0.1:{}/log (Ctrl-C to stop)", port);
        tokio::task::spawn_blocking(move || {
            server::run_server_with_listener(listener, journal, shutdown)
        })
        .await??;
        Ok::<(), anyhow::Error>(())
    })
}

fn run_pending(config: &Config, clear: bool) -> Result<()> {
    let cache = config.open_cache()?;

    if clear {
        cache.clear_entries()?;
        println!("Pending entries cleared");
        return Ok(());
    }

    match cache.get_entries() {
        Some(entries) if !entries.trim().is_empty() => println!("{}", entries),
        _ => println!("No pending entries"),
    }
    if let Some(last) = cache.get_last_entry_time() {
        eprintln!("Last entry: {}", last.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

fn run_config(path: &Path, init: bool, force: bool) -> Result<()> {
    if init {
        if path.exists() && !force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        config::save(&Config::default(), path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = config::try_load(path)?;
    config.validate()?;

    println!("# {}", path.display());
    if !path.exists() {
        println!("# (not found, showing defaults)");
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
