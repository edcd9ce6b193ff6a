//! CLI administration tool for hidden-login.
//!
//! Edits the settings file directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show current settings
//! cargo run --bin admin -- settings show
//!
//! # Set the hidden login path and the redirect for blocked requests
//! cargo run --bin admin -- settings set --login-path my-login --redirect-path 404
//!
//! # Disable the gate
//! cargo run --bin admin -- settings clear
//!
//! # Generate an admin API token
//! cargo run --bin admin -- token generate
//! ```
//!
//! # Environment Variables
//!
//! - `SETTINGS_FILE` (optional): settings file path, overridden by `--file`
//!   (default: `settings.json`)
//!
//! A running server picks up changes on `SIGHUP` or
//! `POST /admin/settings/reload`.

use hidden_login::settings::{FileSettingsStore, Settings, SettingsStore};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// CLI tool for managing hidden-login.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to $SETTINGS_FILE, then settings.json)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage login gate settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Admin API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Settings subcommands.
#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings
    Show,

    /// Set the hidden login path and/or the redirect path
    Set {
        /// Path the login page is served at (e.g., "my-login"); empty disables the gate
        #[arg(short, long)]
        login_path: Option<String>,

        /// Where legacy login requests are redirected (e.g., "404"); empty means home page
        #[arg(short, long)]
        redirect_path: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Clear both paths, disabling the gate
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Generate a random admin token
    Generate {
        /// Print only the token
        #[arg(long)]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let path = cli.file.unwrap_or_else(|| {
        std::env::var("SETTINGS_FILE")
            .unwrap_or_else(|_| "settings.json".to_string())
            .into()
    });
    let store = FileSettingsStore::new(path);

    match cli.command {
        Commands::Settings { action } => handle_settings_action(action, &store).await?,
        Commands::Token { action } => handle_token_action(action),
    }

    Ok(())
}

/// Dispatches settings commands.
async fn handle_settings_action(action: SettingsAction, store: &FileSettingsStore) -> Result<()> {
    match action {
        SettingsAction::Show => show_settings(store).await?,
        SettingsAction::Set {
            login_path,
            redirect_path,
            yes,
        } => set_settings(store, login_path, redirect_path, yes).await?,
        SettingsAction::Clear { yes } => clear_settings(store, yes).await?,
    }

    Ok(())
}

async fn load(store: &FileSettingsStore) -> Result<Settings> {
    store
        .load()
        .await
        .with_context(|| format!("Failed to read {}", store.path().display()))
}

/// Prints current settings.
///
/// # Output Format
///
/// ```text
/// Login Gate Settings
///
///   File:          settings.json
///   Status:        ENABLED
///   Login path:    /my-login
///   Redirect path: /404
/// ```
async fn show_settings(store: &FileSettingsStore) -> Result<()> {
    let settings = load(store).await?;

    println!("{}", "Login Gate Settings".bright_blue().bold());
    println!();
    print_settings(store, &settings);
    println!();

    Ok(())
}

fn print_settings(store: &FileSettingsStore, settings: &Settings) {
    let status = if settings.is_enabled() {
        "ENABLED".green()
    } else {
        "DISABLED".red()
    };

    let redirect = if settings.block_redirect_path.is_empty() {
        "/ (home page)".to_string()
    } else {
        format!("/{}", settings.block_redirect_path)
    };

    println!(
        "  File:          {}",
        store.path().display().to_string().bright_black()
    );
    println!("  Status:        {}", status);
    if settings.is_enabled() {
        println!(
            "  Login path:    {}",
            format!("/{}", settings.hidden_login_path).cyan()
        );
    } else {
        println!("  Login path:    {}", "(not set)".bright_black());
    }
    println!("  Redirect path: {}", redirect.cyan());
}

/// Sets gate settings with interactive prompts.
///
/// # Flow
///
/// 1. Load current settings
/// 2. Prompt for both values if neither flag was given
/// 3. Validate and canonicalize
/// 4. Confirm (unless `--yes`)
/// 5. Write the settings file
async fn set_settings(
    store: &FileSettingsStore,
    login_path: Option<String>,
    redirect_path: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Update Login Gate Settings".bright_blue().bold());
    println!();

    let current = load(store).await?;

    let (login_path, redirect_path) = match (login_path, redirect_path) {
        (None, None) => {
            let login: String = Input::new()
                .with_prompt("Login path (empty disables the gate)")
                .with_initial_text(current.hidden_login_path.clone())
                .allow_empty(true)
                .interact_text()?;
            let redirect: String = Input::new()
                .with_prompt("Redirect path for blocked requests (empty = home page)")
                .with_initial_text(current.block_redirect_path.clone())
                .allow_empty(true)
                .interact_text()?;
            (login, redirect)
        }
        (login, redirect) => (
            login.unwrap_or_else(|| current.hidden_login_path.clone()),
            redirect.unwrap_or_else(|| current.block_redirect_path.clone()),
        ),
    };

    let settings = match Settings::new(&login_path, &redirect_path) {
        Ok(s) => s,
        Err(e) => {
            println!("{} {}", "Invalid settings:".red().bold(), e);
            anyhow::bail!("settings rejected");
        }
    };

    if settings == current {
        println!("{}", "Nothing to change".yellow());
        return Ok(());
    }

    print_settings(store, &settings);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Save these settings?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    store
        .save(&settings)
        .await
        .with_context(|| format!("Failed to write {}", store.path().display()))?;

    println!();
    println!("{}", "Settings saved".green().bold());
    print_reload_hint();

    Ok(())
}

/// Clears both paths after confirmation (default: No).
async fn clear_settings(store: &FileSettingsStore, skip_confirm: bool) -> Result<()> {
    let current = load(store).await?;

    if current == Settings::default() {
        println!("{}", "Settings are already empty".yellow());
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Disable the login gate and clear both paths?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    store
        .save(&Settings::default())
        .await
        .with_context(|| format!("Failed to write {}", store.path().display()))?;

    println!("{}", "Login gate disabled".green().bold());
    print_reload_hint();

    Ok(())
}

fn print_reload_hint() {
    println!();
    println!(
        "  Running servers apply this on {} or {}",
        "SIGHUP".bright_cyan(),
        "POST /admin/settings/reload".bright_cyan()
    );
    println!();
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction) {
    match action {
        TokenAction::Generate { raw } => {
            let token = generate_token();
            if raw {
                println!("{token}");
                return;
            }

            println!("{}", "Generated admin token".green());
            println!();
            println!("  {}", token.bright_yellow().bold());
            println!();
            println!("{}", "Add it to the server environment:".bright_white());
            println!("  ADMIN_TOKEN={}", token);
            println!();
            println!("{}", "Then call the admin API with:".bright_white());
            println!(
                "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/admin/settings",
                token
            );
            println!();
        }
    }
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
