//! CLI administration tool for member-login.
//!
//! Provides commands for managing teams and member accounts and for
//! performing database checks without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a team
//! cargo run --bin admin -- team create Platform
//!
//! # Create a member (password generated when --password is omitted)
//! cargo run --bin admin -- member create alice --name Alice --team Platform
//!
//! # List members with their teams
//! cargo run --bin admin -- member list
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//!
//! # Features
//!
//! - **Team Management**: Create and list teams
//! - **Member Management**: Create members with Argon2-hashed passwords, list members
//! - **Database Tools**: Connection checks and info queries
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use member_login::application::services::{MemberService, TeamService};
use member_login::domain::repositories::JoinStrategy;
use member_login::infrastructure::auth::Argon2Hasher;
use member_login::infrastructure::persistence::{PgMemberRepository, PgTeamRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing member-login.
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
    /// Manage teams
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },

    /// Manage member accounts
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Team management subcommands.
#[derive(Subcommand)]
enum TeamAction {
    /// Create a new team
    Create {
        /// Team name (prompted if omitted)
        name: Option<String>,
    },

    /// List all teams
    List,
}

/// Member management subcommands.
#[derive(Subcommand)]
enum MemberAction {
    /// Create a new member
    Create {
        /// Login identifier
        member_id: String,

        /// Display name (prompted if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Team name the member belongs to
        #[arg(short, long)]
        team: String,

        /// Password (auto-generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all members
    List,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Team { action } => handle_team_action(action, &pool).await?,
        Commands::Member { action } => handle_member_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn team_service(pool: &PgPool) -> TeamService {
    TeamService::new(Arc::new(PgTeamRepository::new(Arc::new(pool.clone()))))
}

fn member_service(pool: &PgPool) -> MemberService {
    MemberService::new(
        Arc::new(PgMemberRepository::new(Arc::new(pool.clone()))),
        Arc::new(Argon2Hasher::new()),
        JoinStrategy::FetchJoin,
    )
}

/// Dispatches team management commands.
async fn handle_team_action(action: TeamAction, pool: &PgPool) -> Result<()> {
    let service = team_service(pool);

    match action {
        TeamAction::Create { name } => {
            println!("{}", "👥 Create Team".bright_blue().bold());
            println!();

            let team_name = match name {
                Some(n) => n,
                None => Input::new().with_prompt("Team name").interact_text()?,
            };

            let team = service
                .create_team(&team_name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create team: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ Team created:".green().bold(),
                team.team_name.cyan(),
                team.team_id.to_string().bright_black()
            );
        }
        TeamAction::List => {
            println!("{}", "📋 Teams".bright_blue().bold());
            println!();

            let teams = service
                .list_teams()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list teams: {}", e))?;

            if teams.is_empty() {
                println!("{}", "  No teams found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<30} {:<20}",
                "ID".bright_white().bold(),
                "Name".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(57).bright_black());

            for team in &teams {
                println!(
                    "  {:<5} {:<30} {}",
                    team.team_id.to_string().bright_black(),
                    team.team_name.cyan(),
                    team.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }

            println!();
            println!("  Total: {}", teams.len().to_string().bright_white().bold());
        }
    }

    println!();
    Ok(())
}

/// Dispatches member management commands.
async fn handle_member_action(action: MemberAction, pool: &PgPool) -> Result<()> {
    match action {
        MemberAction::Create {
            member_id,
            name,
            team,
            password,
            yes,
        } => create_member(pool, member_id, name, team, password, yes).await?,
        MemberAction::List => list_members(pool).await?,
    }

    Ok(())
}

/// Creates a member account.
///
/// # Flow
///
/// 1. Resolve the team by name
/// 2. Prompt for display name (or use provided)
/// 3. Generate a password or use provided value
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash password with Argon2 and store
///
/// A generated password is printed once and cannot be retrieved later.
async fn create_member(
    pool: &PgPool,
    member_id: String,
    name: Option<String>,
    team: String,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🙋 Create Member".bright_blue().bold());
    println!();

    let team = team_service(pool)
        .get_team(&team)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to find team: {}", e))?;

    let name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Display name")
            .with_initial_text(member_id.clone())
            .interact_text()?,
    };

    let (password, generated) = match password {
        Some(p) => (p, false),
        None => (generate_password(), true),
    };

    println!("{}", "Member details:".bright_white().bold());
    println!("  Login id: {}", member_id.cyan());
    println!("  Name:     {}", name.cyan());
    println!("  Team:     {}", team.team_name.cyan());
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this member?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let member = member_service(pool)
        .register_member(member_id, name, &password, team.team_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create member: {}", e))?;

    println!();
    println!(
        "{} {} (member key {})",
        "✅ Member created:".green().bold(),
        member.member_id.cyan(),
        member.member_key.to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Lists all members with their team names.
///
/// # Output Format
///
/// ```text
/// 📋 Members
///
///   Key   Login id             Name                 Team
///   ──────────────────────────────────────────────────────────────────
///   1     alice                Alice                Platform
/// ```
async fn list_members(pool: &PgPool) -> Result<()> {
    println!("{}", "📋 Members".bright_blue().bold());
    println!();

    let members = member_service(pool)
        .list_members()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list members: {}", e))?;

    if members.is_empty() {
        println!("{}", "  No members found".yellow());
        println!();
        println!(
            "  Create one with: {} admin member create <id> --team <team>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<20} {:<20}",
        "Key".bright_white().bold(),
        "Login id".bright_white().bold(),
        "Name".bright_white().bold(),
        "Team".bright_white().bold()
    );
    println!("  {}", "─".repeat(66).bright_black());

    for member in &members {
        println!(
            "  {:<5} {:<20} {:<20} {}",
            member.member_key.to_string().bright_black(),
            member.member_id.cyan(),
            member.name,
            member.team_name.green()
        );
    }

    println!();
    println!(
        "  Total: {}",
        members.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
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

            let teams_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
                .fetch_one(pool)
                .await?;

            let members_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Teams:      {}",
                teams_count.to_string().bright_green().bold()
            );
            println!(
                "  Members:    {}",
                members_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Generates a random member password.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
