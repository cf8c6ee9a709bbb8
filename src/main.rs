use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taneleer::cli::{handle_ledger_command, handle_overlay_command, LedgerCommands, OverlayCommands};
use taneleer::config::{paths::VaultPaths, settings::Settings};
use taneleer::display::help_text;
use taneleer::storage::Storage;
use taneleer::VaultError;

#[derive(Parser)]
#[command(
    name = "vault",
    version,
    about = "Shared item vaults kept in a plain text ledger",
    long_about = "Taneleer keeps named vaults of item quantities in a plain text \
                  file. Modify them with short commands like `thomas -20gp`, and \
                  shape how they read with display names, notes and priority."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Ledger(LedgerCommands),

    /// Display names, notes, priority and zero exceptions
    #[command(subcommand)]
    Config(OverlayCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show the resolved file locations and settings
    Paths,

    /// Show the command guide
    Guide,
}

/// Target for errors an operator must see whatever the log filter says
const OPERATOR_TARGET: &str = "operator";

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let filter = match format!("{}=error", OPERATOR_TARGET).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let paths = VaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings);

    let storage = Storage::with_settings(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Ledger(cmd)) => {
            handle_ledger_command(&storage, cmd)?;
        }
        Some(Commands::Config(cmd)) => {
            handle_overlay_command(&storage, cmd)?;
        }
        Some(Commands::History { count }) => match storage.audit() {
            Some(audit) => {
                let entries = audit.read_recent(count)?;
                if entries.is_empty() {
                    println!("No changes recorded yet.");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
            None => println!("Audit logging is disabled in {}.", paths.settings_file().display()),
        },
        Some(Commands::Paths) => {
            println!("Taneleer Configuration");
            println!("======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Vault file:     {}", paths.ledger_file().display());
            println!("Display file:   {}", paths.overlay_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit enabled: {}", settings.audit_enabled);
            println!("  Log level:     {}", settings.log_level);
        }
        Some(Commands::Guide) | None => {
            println!("{}", help_text());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<VaultError>() {
            Some(vault_err) if vault_err.is_fatal() => {
                tracing::error!(target: OPERATOR_TARGET, "{}", vault_err);
                ExitCode::from(2)
            }
            _ => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        },
    }
}
