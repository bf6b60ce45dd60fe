//! QWINNET CLI - Database migrations and credential provisioning.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! qwinnet-cli migrate
//!
//! # Hash a password read from stdin
//! echo -n 'correct horse battery staple' | qwinnet-cli hash-password
//!
//! # Same, printed as an entry for ADMIN_USERS_FILE
//! qwinnet-cli hash-password --email admin@qwinnet.id < password.txt
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `hash-password` - Produce an Argon2id hash for an administrator

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "qwinnet-cli")]
#[command(author, version, about = "QWINNET site backend tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Hash a password read from stdin for administrator provisioning
    HashPassword {
        /// Print a YAML administrator entry for this email instead of the bare hash
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::HashPassword { email } => {
            commands::hash_password::run(email.as_deref())?;
        }
    }
    Ok(())
}
