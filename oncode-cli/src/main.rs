//! OnCode CLI - Problem-aware coding assistant for competitive programming
//!
//! Reads problem pages from Codeforces, CodeChef, AtCoder and LeetCode,
//! extracts the statement and samples, and talks to the OnCode backend
//! about your solution.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod client;
mod commands;
mod config;
mod error;
mod fetch;
mod output;
mod panel;
mod views;

use commands::*;
use config::OncodeConfig;
use output::{OutputConfig, OutputFormat};

/// Problem-aware coding assistant for competitive programming.
#[derive(Parser)]
#[command(name = "oncode")]
#[command(author, version)]
#[command(about = "Problem-aware coding assistant for competitive programming")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  oncode id https://codeforces.com/problemset/problem/4/A
  oncode extract https://atcoder.jp/contests/abc300/tasks/abc300_a
  oncode chat <url> -m \"Why is this TLE?\" --code sol.cpp
  oncode session <url> --html saved-page.html")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON and borderless tables
    #[arg(long, global = true)]
    compact: bool,

    /// Wrap tables at this many columns (default: terminal width, no wrapping when piped)
    #[arg(long, global = true, value_parser = clap::value_parser!(u16).range(20..))]
    width: Option<u16>,

    /// Settings file (default: <config dir>/oncode/settings.toml)
    #[arg(long, global = true, env = "ONCODE_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides backendUrl from settings)
    #[arg(long, global = true, env = "ONCODE_BACKEND_URL")]
    backend_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    // ==================== Problem pages ====================
    /// List supported judges
    Sites,

    /// Show which judge a URL belongs to
    Site {
        url: String,
    },

    /// Print the problem id for a URL
    Id {
        url: String,
    },

    /// Extract statement, I/O format and samples from a problem page
    Extract {
        url: String,

        /// Read the page from a saved HTML file instead of downloading it
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Print the code in the page's embedded editor
    Code {
        url: String,

        /// Saved HTML of the page with the editor open
        #[arg(long)]
        html: PathBuf,
    },

    // ==================== Assistant ====================
    /// Show the stored conversation for a problem
    History {
        url: String,
    },

    /// Send one message about a problem
    Chat {
        url: String,

        /// Message to send
        #[arg(short, long)]
        message: String,

        /// Send the contents of this file as your code
        #[arg(long, conflicts_with = "ide")]
        code: Option<PathBuf>,

        /// Send the code from the page's editor (needs --html)
        #[arg(long)]
        ide: bool,

        /// Read the page from a saved HTML file instead of downloading it
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Get suggestions and hints for your code
    Analyze {
        url: String,

        /// Code to analyze
        #[arg(long, conflicts_with = "ide")]
        code: Option<PathBuf>,

        /// Analyze the code from the page's editor (needs --html)
        #[arg(long)]
        ide: bool,

        /// Read the page from a saved HTML file instead of downloading it
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Interactive chat about a problem
    Session {
        url: String,

        /// Read the page from a saved HTML file instead of downloading it
        #[arg(long)]
        html: Option<PathBuf>,

        /// Load this file as your code at start
        #[arg(long)]
        code: Option<PathBuf>,
    },

    /// Check that the backend is running
    Ping,

    // ==================== Utility ====================
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: completions::Shell,

        /// Show installation instructions instead of the script
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug,hyper=info,reqwest=info,html5ever=info,selectors=info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config_path = match cli.config {
        Some(path) => path,
        None => OncodeConfig::default_path()
            .ok_or_else(|| anyhow::anyhow!("No config directory found; pass --config <file>"))?,
    };
    let config = OncodeConfig::load(&config_path);

    // CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    let mut output = OutputConfig::auto_detect(format);
    if let Some(width) = cli.width {
        output = output.with_width(usize::from(width));
    }
    if cli.compact {
        output = output.compact();
    }

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    let backend_url = cli
        .backend_url
        .unwrap_or_else(|| config.backend_url.clone());
    let ctx = AppContext {
        config,
        config_path,
        output,
        backend_url,
    };

    match command {
        Commands::Sites => sites::run(output).await,
        Commands::Site { url } => site::run(&url, output).await,
        Commands::Id { url } => id::run(&url, output).await,
        Commands::Extract { url, html } => extract::run(&url, html.as_deref(), output).await,
        Commands::Code { url, html } => code::run(&url, &html, output).await,

        Commands::History { url } => history::run(&ctx, &url).await,
        Commands::Chat {
            url,
            message,
            code,
            ide,
            html,
        } => {
            let source = chat::CodeSource::from_flags(code, ide);
            chat::run(&ctx, &url, &message, source, html.as_deref()).await
        }
        Commands::Analyze {
            url,
            code,
            ide,
            html,
        } => {
            let source = chat::CodeSource::from_flags(code, ide);
            analyze::run(&ctx, &url, source, html.as_deref()).await
        }
        Commands::Session { url, html, code } => {
            session::run(&ctx, &url, html.as_deref(), code).await
        }
        Commands::Ping => ping::run(&ctx).await,

        Commands::Config { action } => commands::config::run(&ctx, action).await,
        Commands::Completions {
            shell,
            instructions,
        } => completions::run(shell, instructions, &mut Cli::command(), output),
    }
}
