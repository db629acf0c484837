//! authform - log in to or sign up with a JSON auth API from the terminal.
//!
//! Reads an email and password, submits them to the configured API and
//! reports where the "page" ended up: the landing page after a login, the
//! login page after a signup, or unchanged after a rejection.

mod notifier;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use authform_core::{
    storage, ApiClient, Config, CredentialHandler, HandlerOptions, LocationNavigator, StorageKind,
    TokenStorage,
};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use notifier::TerminalNotifier;

/// Page the signup form lives on, used as the starting location
const SIGNUP_PAGE: &str = "signup.html";

#[derive(Debug, Parser)]
#[command(name = "authform", version, about = "Log in or sign up against a JSON auth API")]
struct Cli {
    /// API origin, e.g. http://localhost:3000/
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Where the session token is kept: file, keyring or memory
    #[arg(long, global = true)]
    storage: Option<StorageKind>,

    /// Show alerts without waiting for Enter
    #[arg(long, global = true)]
    no_wait: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit the login form and store the returned token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Submit the signup form
    Signup {
        #[arg(long)]
        email: Option<String>,
    },
    /// Print the stored session token
    Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Login,
    Signup,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(kind) = cli.storage {
        config.storage = kind;
    }

    match cli.command {
        Command::Login { email } => submit(Form::Login, email, &config, !cli.no_wait).await,
        Command::Signup { email } => submit(Form::Signup, email, &config, !cli.no_wait).await,
        Command::Token => show_token(&config),
    }
}

async fn submit(form: Form, email: Option<String>, config: &Config, wait: bool) -> Result<()> {
    let base_url = config.base_url()?;
    let email = match email {
        Some(email) => email,
        None => prompt_email(config.last_email.as_deref())?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    let start_page = match form {
        Form::Login => config.login_location.as_str(),
        Form::Signup => SIGNUP_PAGE,
    };
    let navigator = Arc::new(LocationNavigator::new(base_url.join(start_page)?));

    let client = ApiClient::new(base_url, config.request_timeout_secs.map(Duration::from_secs))?;
    let handler = CredentialHandler::new(
        client,
        storage::open(config)?,
        navigator.clone(),
        Arc::new(TerminalNotifier::new(wait)),
    )
    .with_options(HandlerOptions::from(config));

    info!(form = ?form, storage = %config.storage, "Submitting form");
    let succeeded = match form {
        Form::Login => handler.login(&email, &password).await.map(|o| o.is_success()),
        Form::Signup => handler.signup(&email, &password).await.map(|o| o.is_success()),
    }
    .context("Submission failed")?;

    if succeeded {
        if let Err(e) = Config::remember_email(&email) {
            warn!(error = %e, "Failed to save config");
        }
    }

    println!("{}", navigator.current());
    Ok(())
}

fn prompt_email(last_email: Option<&str>) -> Result<String> {
    match last_email {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(resolve_email(&input, last_email))
}

/// Empty input falls back to the remembered email
fn resolve_email(input: &str, last_email: Option<&str>) -> String {
    let input = input.trim_end_matches(['\r', '\n']);
    match last_email {
        Some(last) if input.trim().is_empty() => last.to_string(),
        _ => input.to_string(),
    }
}

fn show_token(config: &Config) -> Result<()> {
    let storage = storage::open(config)?;
    match storage.get_item(&config.token_key)? {
        Some(token) => {
            if let Some(stored_at) = storage.stored_at(&config.token_key)? {
                eprintln!("Stored {}", stored_at.to_rfc3339());
            }
            println!("{}", token);
        }
        None => eprintln!("No token stored for {}", config.origin_label()?),
    }
    Ok(())
}
