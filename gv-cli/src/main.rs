//! gvoice - command-line client for Google Voice.
//!
//! Every command signs in with the configured (or prompted) credentials,
//! performs one action and exits. Nothing is persisted between runs except
//! what `login --save` writes to the config file.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use gv_core::config::{AppConfig, ConfigHandle};
use gv_core::error::GvResult;
use gv_core::logging;
use gv_core::platform::Platform;

/// Google Voice from the terminal.
#[derive(Parser)]
#[command(
    name = "gvoice",
    version,
    about = "Google Voice command-line client",
    long_about = "Place calls, send SMS and read voicemail, SMS and call history\n\
                  through the Google Voice web interface."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and check that the credentials work.
    Login {
        /// Account email (overrides config).
        #[arg(short, long)]
        email: Option<String>,
        /// Write the credentials to the config file after a successful login.
        #[arg(long)]
        save: bool,
    },
    /// Sign in, then sign out again.
    Logout,
    /// Place a call: ring a forwarding phone, then connect it to NUMBER.
    Call {
        /// Number to call.
        number: String,
        /// Forwarding phone to ring first (overrides config).
        #[arg(long)]
        from: Option<String>,
        /// Phone type of the forwarding phone (1 home, 2 mobile, 3 work, 7 gizmo).
        #[arg(long)]
        phone_type: Option<u8>,
    },
    /// Cancel a call that is being placed.
    Cancel {
        /// Number being called.
        number: Option<String>,
        /// Forwarding phone that is ringing.
        #[arg(long)]
        from: Option<String>,
    },
    /// Send a text message.
    Sms {
        /// Recipient number.
        number: String,
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List the messages in a folder (inbox, voicemail, sms, missed, ...).
    Folder {
        /// Folder name.
        name: String,
        /// Only show unread messages.
        #[arg(short, long)]
        unread: bool,
        /// Maximum number of messages to display.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Search calls, voicemail and SMS.
    Search {
        /// Search terms.
        query: String,
        /// Maximum number of results to display.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Download a voicemail or recording as MP3.
    Download {
        /// Message id (40 hex characters).
        id: String,
        /// Output directory (overrides config).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Act on messages: delete, star, mark read.
    Messages {
        #[command(subcommand)]
        action: commands::messages::MessagesAction,
    },
    /// List and toggle forwarding phones.
    Phones {
        #[command(subcommand)]
        action: commands::phones::PhonesAction,
    },
    /// Show account settings.
    Settings,
    /// List contacts.
    Contacts {
        /// Maximum number of contacts to display.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> GvResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_config_path()?,
    };
    let config = if config_path.exists() {
        AppConfig::load_from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    let _guard = logging::init_from_config(&config, cli.verbose.then_some("debug"))?;
    debug!(
        "gvoice v{} on {} using config {}",
        gv_core::constants::APP_VERSION,
        Platform::current(),
        config_path.display()
    );

    let ctx = commands::Context {
        config: ConfigHandle::new(config),
        config_path,
        format: cli.format,
    };

    let result = match cli.command {
        Commands::Login { email, save } => commands::login::login(&ctx, email, save).await,
        Commands::Logout => commands::login::logout(&ctx).await,
        Commands::Call { number, from, phone_type } => {
            commands::call::call(&ctx, number, from, phone_type).await
        }
        Commands::Cancel { number, from } => commands::call::cancel(&ctx, number, from).await,
        Commands::Sms { number, text } => commands::sms::run(&ctx, number, text.join(" ")).await,
        Commands::Folder { name, unread, limit } => {
            commands::folder::folder(&ctx, &name, unread, limit).await
        }
        Commands::Search { query, limit } => commands::folder::search(&ctx, &query, limit).await,
        Commands::Download { id, output } => commands::download::run(&ctx, &id, output).await,
        Commands::Messages { action } => commands::messages::run(&ctx, action).await,
        Commands::Phones { action } => commands::phones::run(&ctx, action).await,
        Commands::Settings => commands::settings::run(&ctx).await,
        Commands::Contacts { limit } => commands::contacts::run(&ctx, limit).await,
    };

    if let Err(e) = &result {
        if e.is_auth() {
            eprintln!(
                "Sign-in failed. Check [auth] in {} or run `gvoice login`.",
                ctx.config_path.display()
            );
        }
    }
    result
}
