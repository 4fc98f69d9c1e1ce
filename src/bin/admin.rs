//! CLI administration tool for receptor-gate.
//!
//! Helps operators produce the credentials clients present to the service
//! and check a configuration before deploying it.
//!
//! # Usage
//!
//! ```bash
//! # Print an Authorization header for curl and API clients
//! cargo run --bin admin -- credentials header --username user
//!
//! # Print a Set-Cookie line for browser clients
//! cargo run --bin admin -- credentials cookie --username user --password pass
//!
//! # Validate the environment configuration
//! cargo run --bin admin -- config check
//! ```

use receptor_gate::application::services::auth_service::basic_authorization;
use receptor_gate::config::{self, DEFAULT_COOKIE_NAME};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};

/// CLI tool for managing receptor-gate.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Produce client credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Credential subcommands.
#[derive(Subcommand)]
enum CredentialsAction {
    /// Print an Authorization header for the Basic scheme
    Header {
        #[arg(short, long)]
        username: Option<String>,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Print a Set-Cookie line carrying the Basic credential
    Cookie {
        #[arg(short, long)]
        username: Option<String>,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Cookie name the server bridges into Authorization
        #[arg(short, long, default_value = DEFAULT_COOKIE_NAME)]
        cookie_name: String,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Validate configuration from the environment
    Check,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Credentials { action } => handle_credentials_action(action)?,
        Commands::Config { action } => match action {
            ConfigAction::Check => check_config()?,
        },
    }

    Ok(())
}

/// Dispatches credential commands.
fn handle_credentials_action(action: CredentialsAction) -> Result<()> {
    match action {
        CredentialsAction::Header { username, password } => {
            let (username, password) = prompt_credentials(username, password)?;
            let value = basic_authorization(&username, &password);

            println!();
            println!("{}", "Add this to your requests:".bright_white());
            println!("  {}: {}", "Authorization".bright_cyan(), value.bright_yellow());
            println!();
            println!("{}", "Example:".bright_white());
            println!(
                "  curl -H \"Authorization: {}\" http://localhost:8887/health",
                value.bright_yellow()
            );
        }
        CredentialsAction::Cookie {
            username,
            password,
            cookie_name,
        } => {
            let (username, password) = prompt_credentials(username, password)?;
            // Cookie values may not contain spaces unquoted.
            let value = format!("\"{}\"", basic_authorization(&username, &password));

            println!();
            println!("{}", "Set this cookie for browser clients:".bright_white());
            println!(
                "  {}: {}={}; Secure; HttpOnly",
                "Set-Cookie".bright_cyan(),
                cookie_name,
                value.bright_yellow()
            );
        }
    }
    println!();

    Ok(())
}

/// Fills in missing credentials interactively.
fn prompt_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    if username.contains(':') {
        anyhow::bail!("Username must not contain ':'");
    }

    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    Ok((username, password))
}

/// Loads and validates the configuration, printing a summary.
fn check_config() -> Result<()> {
    println!("{}", "Checking configuration...".bright_blue().bold());

    match config::load_from_env() {
        Ok(config) => {
            println!("{}", "Configuration is valid".green().bold());
            println!("  Listen:      {}", config.listen_addr.cyan());
            if config.is_auth_enabled() {
                println!("  Basic auth:  {}", "enabled".green());
                println!("  Auth cookie: {}", config.gate.cookie_name.cyan());
            } else {
                println!("  Basic auth:  {}", "disabled".yellow());
            }
            let cors = if config.gate.cors_enabled {
                "enabled".green()
            } else {
                "disabled".yellow()
            };
            println!("  CORS:        {}", cors);
            Ok(())
        }
        Err(e) => {
            println!("{}", "Configuration is invalid".red().bold());
            Err(e)
        }
    }
}
