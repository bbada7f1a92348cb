// ABOUTME: StreakFit CLI - command-line client for the StreakFit API
// ABOUTME: Signs in, manages workouts and sessions, and prints activity streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create an account (the token is stored under the config directory)
//! streakfit-cli register --email runner@example.com --password secret123
//!
//! # Show the last year of activity with streaks
//! streakfit-cli activity
//!
//! # Show a custom range
//! streakfit-cli activity --start-date 2024-01-01 --end-date 2024-03-31
//!
//! # Search the exercise catalog
//! streakfit-cli exercises --search curl
//!
//! # Resume check, then finish or cancel the in-progress session
//! streakfit-cli active
//! streakfit-cli cancel 6f1c...
//! ```

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use streakfit::{
    activity::heatmap_rows,
    client::{SessionContext, StreakfitClient},
    config::HttpClientConfig,
    errors::{AppError, AppResult},
    services::parse_resource_id,
};
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "streakfit-cli",
    about = "StreakFit API command-line client",
    long_about = "Command-line client for StreakFit: accounts, workouts, sessions and activity streaks."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL
    #[arg(long, global = true, env = "STREAKFIT_API_URL", default_value = "http://localhost:8081")]
    api_url: String,

    /// Token file override
    #[arg(long, global = true, env = "STREAKFIT_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create an account and sign in
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (at least 6 characters)
        #[arg(long)]
        password: String,
    },

    /// Sign in
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in account
    Me,

    /// List workout templates
    Workouts,

    /// Show per-day activity counts and streaks
    Activity {
        /// First day (YYYY-MM-DD), defaults to a year before the end date
        #[arg(long)]
        start_date: Option<String>,

        /// Last day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Search the exercise catalog
    Exercises {
        /// Search term
        #[arg(long)]
        search: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Start a session of a workout template
    Start {
        /// Workout id
        workout_id: String,
    },

    /// Show the in-progress session, if any
    Active,

    /// Cancel an in-progress session
    Cancel {
        /// Workout activity id
        activity_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let session = match cli.token_file.or_else(SessionContext::default_token_path) {
        Some(path) => SessionContext::with_token_file(path),
        None => SessionContext::in_memory(),
    };
    if session.init().await?.is_some() {
        debug!("Loaded stored session token");
    }

    let client = StreakfitClient::new(&cli.api_url, &HttpClientConfig::from_env(), session)?;
    run(&client, cli.command).await
}

async fn run(client: &StreakfitClient, command: Command) -> Result<()> {
    match command {
        Command::Register { email, password } => {
            print_json(&client.register(&email, &password).await?.user)
        }
        Command::Login { email, password } => {
            print_json(&client.login(&email, &password).await?.user)
        }
        Command::Logout => {
            client.logout().await?;
            println!("Signed out");
            Ok(())
        }
        Command::Me => print_json(&client.me().await?),
        Command::Workouts => print_json(&client.list_workouts().await?),
        Command::Activity {
            start_date,
            end_date,
        } => {
            let activity = client
                .activity(start_date.as_deref(), end_date.as_deref())
                .await?;
            for row in heatmap_rows(&activity.data) {
                println!("{row}");
            }
            let summary = activity.summary;
            println!(
                "Workouts: {}  Active days: {}  Current streak: {}  Longest streak: {}",
                summary.total_workouts,
                summary.active_days,
                summary.current_streak,
                summary.longest_streak
            );
            Ok(())
        }
        Command::Exercises { search, limit } => {
            print_json(&client.search_exercises(search.as_deref(), limit).await?)
        }
        Command::Start { workout_id } => {
            let workout_id = parse_resource_id("Workout", &workout_id)?;
            print_json(&client.start_workout(workout_id).await?)
        }
        Command::Active => match client.active_workout().await? {
            Some(active) => print_json(&active),
            None => {
                println!("No workout in progress");
                Ok(())
            }
        },
        Command::Cancel { activity_id } => {
            let activity_id = parse_resource_id("Workout activity", &activity_id)?;
            client.cancel_workout(activity_id).await?;
            println!("Workout cancelled");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(AppError::from)?;
    println!("{rendered}");
    Ok(())
}
