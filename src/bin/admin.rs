//! CLI administration tool for link-analytics.
//!
//! Provides commands for provisioning owners, API tokens and links, printing
//! owner reports, and performing database checks without HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an owner
//! cargo run --bin admin -- owner create --name alice
//!
//! # Create a new API token for owner 1
//! cargo run --bin admin -- token create --owner 1
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Production API"
//!
//! # Shorten a link
//! cargo run --bin admin -- link create --owner 1 --url https://example.com --alias promo
//!
//! # Print the report of owner 1
//! cargo run --bin admin -- report --owner 1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`link_analytics::config`].

use link_analytics::api::dto::analytics::AnalyticsResponse;
use link_analytics::application::services::auth_service::hash_token;
use link_analytics::application::services::{LinkService, ReportService};
use link_analytics::config::{Config, load_from_env};
use link_analytics::domain::entities::OwnerId;
use link_analytics::domain::report::Report;
use link_analytics::domain::repositories::{OwnerRepository, TokenRepository};
use link_analytics::infrastructure::persistence::{
    PgClickRepository, PgLinkRepository, PgOwnerRepository, PgTokenRepository,
};
use link_analytics::server::connect_pool;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-analytics.
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
    /// Manage owners
    Owner {
        #[command(subcommand)]
        action: OwnerAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Print an owner's click report
    Report {
        /// Owner ID
        #[arg(short, long)]
        owner: i64,

        /// Print the report as JSON, exactly as `GET /api/analytics` returns it
        #[arg(long)]
        json: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Owner management subcommands.
#[derive(Subcommand)]
enum OwnerAction {
    /// Create a new owner
    Create {
        /// Owner name (unique)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all owners
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Owner the token authenticates as
        #[arg(short, long)]
        owner: i64,

        /// Token name (e.g., "Production API", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Owner ID
        #[arg(short, long)]
        owner: i64,

        /// Destination URL (http or https)
        #[arg(short, long)]
        url: String,

        /// Custom alias used as the short code
        #[arg(short, long)]
        alias: Option<String>,

        /// Expiration time, RFC 3339 (e.g. 2025-12-31T23:59:59Z)
        #[arg(short, long)]
        expires: Option<DateTime<Utc>>,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env()?;
    let pool = connect_pool(&config.database).await?;

    match cli.command {
        Commands::Owner { action } => handle_owner_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool, &config).await?,
        Commands::Link { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Report { owner, json } => {
            handle_report(OwnerId(owner), json, &pool, &config).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches owner management commands.
async fn handle_owner_action(action: OwnerAction, pool: &PgPool) -> Result<()> {
    let repo = PgOwnerRepository::new(Arc::new(pool.clone()));

    match action {
        OwnerAction::Create { name } => {
            println!("{}", "👤 Create Owner".bright_blue().bold());
            println!();

            let name = match name {
                Some(n) => n,
                None => Input::new().with_prompt("Owner name").interact_text()?,
            };

            let owner = repo
                .create(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create owner: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ Owner created:".green().bold(),
                owner.name.cyan(),
                owner.id.to_string().bright_white().bold()
            );
        }
        OwnerAction::List => {
            println!("{}", "📋 Owners".bright_blue().bold());
            println!();

            let owners = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list owners: {}", e))?;

            if owners.is_empty() {
                println!("{}", "  No owners found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<30} {:<20}",
                "ID".bright_white().bold(),
                "Name".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(57).bright_black());

            for owner in &owners {
                println!(
                    "  {:<5} {:<30} {}",
                    owner.id.to_string().bright_black(),
                    owner.name.cyan(),
                    owner
                        .created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            owner,
            name,
            token,
            yes,
        } => {
            create_token(
                repo,
                OwnerId(owner),
                name,
                token,
                yes,
                &config.token_signing_secret,
            )
            .await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Security
///
/// - Only the HMAC-SHA256 hash (keyed by `TOKEN_SIGNING_SECRET`) is stored
/// - Raw token is displayed once and cannot be retrieved later
/// - Tokens are 48 characters (alphanumeric) for high entropy
async fn create_token(
    repo: Arc<PgTokenRepository>,
    owner_id: OwnerId,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
    signing_secret: &str,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Production API")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Owner: {}", owner_id.to_string().cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(signing_secret, &token_value);

    repo.create_token(owner_id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/analytics",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create --owner <id>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<6} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Owner".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<6} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.owner_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let owners = PgOwnerRepository::new(pool.clone());
    let service = LinkService::new(Arc::new(PgLinkRepository::new(pool)));

    match action {
        LinkAction::Create {
            owner,
            url,
            alias,
            expires,
        } => {
            let owner_id = OwnerId(owner);
            owners
                .find_by_id(owner_id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Owner not found")?;

            let link = service
                .create_link(owner_id, &url, alias, expires)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            let short_url =
                link_analytics::domain::report::short_url(&config.http.public_base_url, &link.short_code);

            println!("{}", "✅ Link created".green().bold());
            println!("  Short URL: {}", short_url.bright_yellow().bold());
            println!("  Target:    {}", link.original_url.cyan());
            if let Some(expires) = link.expiration_date {
                println!(
                    "  Expires:   {}",
                    expires.format("%Y-%m-%d %H:%M UTC").to_string().bright_black()
                );
            }
        }
    }

    Ok(())
}

/// Builds and prints an owner report.
async fn handle_report(owner_id: OwnerId, json: bool, pool: &PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let service = ReportService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
        config.http.public_base_url.clone(),
    );

    let report = service
        .build_report(owner_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build report: {}", e))?;

    if json {
        let body = AnalyticsResponse::from(report);
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_report(owner_id, &report);
    Ok(())
}

fn print_report(owner_id: OwnerId, report: &Report) {
    println!(
        "{} {}",
        "📊 Report for owner".bright_blue().bold(),
        owner_id.to_string().bright_white().bold()
    );
    println!();

    if report.is_empty() {
        println!("{}", "  No links yet".yellow());
        return;
    }

    println!("{}", "Links".bright_white().bold());
    for link in &report.urls {
        let status = if link.expired {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };
        println!(
            "  {:<40} {:>7}  {}  {}",
            link.short_url.cyan(),
            link.clicks.to_string().bright_white().bold(),
            status,
            link.original_url.bright_black()
        );
    }
    println!();

    println!("{}", "Clicks over time (UTC)".bright_white().bold());
    if report.clicks_over_time.is_empty() {
        println!("{}", "  No clicks recorded".yellow());
    }
    for day in &report.clicks_over_time {
        println!(
            "  {:<12} {:>7}",
            day.label(),
            day.clicks.to_string().bright_green()
        );
    }
    println!();

    println!("{}", "Devices".bright_white().bold());
    for row in &report.device_stats {
        println!(
            "  {:<40} {:>7}",
            row.name(),
            row.count.to_string().bright_green()
        );
    }
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;
            let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM click_events")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
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
