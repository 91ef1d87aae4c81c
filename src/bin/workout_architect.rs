// ABOUTME: Interactive command-line front end for the workout planner
// ABOUTME: Keeps the transcript between turns and prints each plan between separators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Interactive session
//! workout-architect
//!
//! # Single turn
//! workout-architect --query "Legs for 45 minutes at the gym, feeling energetic"
//!
//! # Use the built-in exercise list instead of the wger API
//! workout-architect --offline
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use workout_architect::{
    config::AppConfig,
    external::{ExerciseCatalog, MockExerciseCatalog, WgerClient},
    logging::LoggingConfig,
    models::Transcript,
    planning::WorkoutPlanner,
};

#[derive(Parser)]
#[command(
    name = "workout-architect",
    about = "Conversational single-session workout planner",
    long_about = "Describe the workout you want; the planner asks for anything missing, \
                  looks up exercises in the wger catalog and composes a plan."
)]
struct Cli {
    /// Run a single turn with this request and exit
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// Use the built-in exercise list instead of the wger API
    #[arg(long)]
    offline: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::for_cli(cli.verbose).init()?;

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    info!("{}", config.summary());

    let catalog: Arc<dyn ExerciseCatalog> = if cli.offline {
        Arc::new(MockExerciseCatalog::new())
    } else {
        Arc::new(WgerClient::new(config.catalog.clone())?)
    };
    let planner = WorkoutPlanner::from_config(&config, catalog)?;

    if let Some(query) = cli.query {
        let outcome = planner.handle_turn(&query, Transcript::new()).await;
        print_plan(&outcome.response);
        return Ok(());
    }

    run_interactive(&planner, &config).await
}

async fn run_interactive(planner: &WorkoutPlanner, config: &AppConfig) -> Result<()> {
    println!("Welcome to AI Workout Architect!");
    println!(
        "Using LLM Provider: {}, Model: {}",
        config.llm.provider, config.llm.model
    );
    println!("Type 'quit' or 'exit' to stop.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut transcript = Transcript::new();

    loop {
        print!("\nHow can I help you plan your workout today? \n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if matches!(query.to_lowercase().as_str(), "quit" | "exit") {
            println!("Stay fit! Goodbye!");
            break;
        }
        if query.is_empty() {
            continue;
        }

        println!("\nThinking...\n");
        let outcome = planner.handle_turn(query, transcript).await;
        transcript = outcome.transcript;
        print_plan(&outcome.response);
    }
    Ok(())
}

fn print_plan(response: &str) {
    println!("--- AI Workout Architect Plan ---");
    println!("{response}");
    println!("---------------------------------");
}
