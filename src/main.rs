//! SitWithMe CLI entry point
//!
//! Each invocation loads the snapshot file (when present), performs one
//! host/join/seat/show action, and writes the snapshot back. The store
//! itself is in-memory only; the snapshot is a convenience export with
//! no atomicity guarantee.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use sitwithme::cli::{Cli, Command};
use sitwithme::config::Config;
use sitwithme::gateway::GeminiClient;
use sitwithme::party::{EventDetails, Party};
use sitwithme::planner::Planner;
use sitwithme::store::PartyStore;

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitwithme")
        .join("logs");

    std::fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file =
        std::fs::File::create(log_dir.join("sitwithme.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(model = %config.gateway.model, "SitWithMe loaded config");

    let store = Arc::new(PartyStore::new());
    let snapshot = &config.storage.snapshot_path;
    if snapshot.exists() {
        store
            .load_snapshot(snapshot)
            .context("Failed to load party snapshot")?;
    }

    let gateway = Arc::new(GeminiClient::from_config(&config.gateway)?);
    let planner = Planner::new(store.clone(), gateway);

    match cli.command {
        Command::Host {
            tables,
            seats,
            name,
            description,
            vibes,
        } => {
            let event = match (name, description) {
                (None, None) if vibes.is_empty() => None,
                (name, description) => Some(EventDetails {
                    name: name.unwrap_or_default(),
                    description: description.unwrap_or_default(),
                    vibes,
                }),
            };
            let party = planner.create_party(tables, seats, event).await?;
            println!(
                "Party created! Share this code with your guests: {}",
                party.code.bold().green()
            );
            println!("Suggested interests: {}", party.suggested_interests.join(", "));
        }
        Command::Join {
            code,
            name,
            age,
            interests,
        } => {
            let code = code.to_uppercase();
            planner.join_party(&code, &name, age, interests)?;
            println!("{} joined party {}", name.bold(), code.green());
        }
        Command::Seat { code } => {
            let code = code.to_uppercase();
            let plan = planner.run_seating(&code).await?;
            let party = store.get(&code)?;
            print_plan(&party, &plan);
        }
        Command::Show { code } => {
            let code = code.to_uppercase();
            let party = store.get(&code)?;
            print_party(&party);
        }
    }

    store
        .save_snapshot(snapshot)
        .context("Failed to save party snapshot")?;

    Ok(())
}

fn print_party(party: &Party) {
    println!("Party {}", party.code.bold().green());
    println!(
        "  {} tables x {} seats ({} total)",
        party.table_count,
        party.seats_per_table,
        party.capacity()
    );
    if let Some(event) = &party.event {
        if !event.name.is_empty() {
            println!("  Event: {}", event.name);
        }
        if !event.description.is_empty() {
            println!("  {}", event.description.italic());
        }
    }
    println!("  Interests: {}", party.suggested_interests.join(", "));
    println!("  Guests ({}):", party.guests.len());
    for guest in &party.guests {
        println!(
            "    {} ({}) - {}",
            guest.name.bold(),
            guest.age,
            guest.interests.join(", ")
        );
    }
    if let Some(plan) = &party.seating {
        print_plan(party, plan);
    }
}

fn print_plan(party: &Party, plan: &sitwithme::party::SeatingPlan) {
    println!("{}", "Seating plan".bold());
    for table in &plan.tables {
        println!(
            "  Table {} ({}/{} seats)",
            table.number,
            table.guests.len(),
            party.seats_per_table
        );
        for guest in &table.guests {
            println!(
                "    {}, {} yrs - {}",
                guest.name.bold(),
                guest.age,
                guest.interests.join(", ")
            );
        }
        let empty = party.seats_per_table.saturating_sub(table.guests.len() as u32);
        for _ in 0..empty {
            println!("    {}", "(empty seat)".dimmed());
        }
    }
}
