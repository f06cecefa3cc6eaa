mod config;
mod logging;
mod runner;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use picker_core::{authorize_url, intercept_redirect, AppViewModel, RedirectOutcome};
use picker_engine::{FeedClient, FileTokenStore, ReqwestTransport, TokenStore};

use config::{load_config, PickerConfig};
use logging::LogDestination;
use runner::{browse, EffectRunner};

#[derive(Debug, Parser)]
#[command(name = "picker", about = "Browse and pick photos from your recent media feed")]
struct Cli {
    /// Path to the RON config file.
    #[arg(long, default_value = "picker.ron")]
    config: PathBuf,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the URL that starts the browser login.
    LoginUrl,
    /// Store the token from the URL the login redirected to.
    CompleteLogin { redirect_url: String },
    /// Forget the stored token.
    Logout,
    /// Report whether a token is stored.
    Status,
    /// Fetch pages of recent photos and print them.
    Browse {
        #[arg(long, default_value_t = 1)]
        pages: u32,
        #[arg(long, default_value_t = picker_core::DEFAULT_TILE_SIZE)]
        tile_width: i32,
        #[arg(long, default_value_t = picker_core::DEFAULT_TILE_SIZE)]
        tile_height: i32,
        /// Indices of photos to mark as picked.
        #[arg(long)]
        select: Vec<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(cli.log, level);

    let config = load_config(&cli.config);
    let tokens = Arc::new(FileTokenStore::new(config.token_dir.clone()));

    match cli.command {
        Command::LoginUrl => {
            let url = authorize_url(&config.login_config()).context("building login url")?;
            println!("{url}");
        }
        Command::CompleteLogin { redirect_url } => {
            match intercept_redirect(&redirect_url, &config.redirect_uri) {
                RedirectOutcome::Token(token) => {
                    tokens.save(&token);
                    println!("Logged in.");
                }
                RedirectOutcome::Denied(message) => bail!(message),
                RedirectOutcome::NotRedirect => {
                    bail!("URL does not start with redirect URI {:?}", config.redirect_uri)
                }
            }
        }
        Command::Logout => {
            tokens.clear();
            println!("Logged out.");
        }
        Command::Status => {
            let state = if tokens.has() { "logged in" } else { "logged out" };
            println!("{state} (token store {:?})", tokens.path());
        }
        Command::Browse {
            pages,
            tile_width,
            tile_height,
            select,
        } => {
            let runner = build_runner(&config, tokens)?;
            let state = browse(&runner, pages, (tile_width, tile_height), &select);
            print_view(&state.view());
        }
    }
    Ok(())
}

fn build_runner(config: &PickerConfig, tokens: Arc<FileTokenStore>) -> anyhow::Result<EffectRunner> {
    let transport =
        ReqwestTransport::new(config.transport_settings()).context("building http client")?;
    let client = FeedClient::new(config.feed_settings(), Arc::new(transport), tokens);
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    Ok(EffectRunner::new(client, runtime))
}

fn print_view(view: &AppViewModel) {
    println!(
        "{:?}: {} photos, {} picked",
        view.session, view.photo_count, view.selected_count
    );
    for row in &view.rows {
        let marker = if row.selected { "*" } else { " " };
        println!(
            "{marker} {:>3} {:<24} {}",
            row.index,
            row.id,
            row.image_url.as_deref().unwrap_or("-")
        );
    }
    if let Some(stats) = &view.last_page {
        if stats.skipped > 0 || stats.duplicates > 0 {
            println!(
                "last page: {} skipped, {} duplicates",
                stats.skipped, stats.duplicates
            );
        }
    }
    if let Some(error) = &view.last_error {
        println!("error: {error}");
    }
}
