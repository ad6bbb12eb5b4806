//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SitWithMe - party planner with model-generated seating
#[derive(Parser)]
#[command(
    name = "sitwithme",
    about = "Create a party, let guests join, and ask a generative model for the seating plan",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Create a party and print its shareable code
    Host {
        /// Number of tables
        #[arg(long)]
        tables: u32,

        /// Seats per table
        #[arg(long)]
        seats: u32,

        /// Event name
        #[arg(long)]
        name: Option<String>,

        /// Free-text event description (enables model-suggested interests)
        #[arg(long)]
        description: Option<String>,

        /// Vibe tags, repeatable
        #[arg(long = "vibe")]
        vibes: Vec<String>,
    },

    /// Join a party as a guest
    Join {
        /// Party code
        code: String,

        /// Guest name
        #[arg(long)]
        name: String,

        /// Guest age
        #[arg(long)]
        age: u32,

        /// Interests, repeatable
        #[arg(long = "interest")]
        interests: Vec<String>,
    },

    /// Run the seating arrangement for a party
    Seat {
        /// Party code
        code: String,
    },

    /// Show a party: guests, interests, and the stored seating plan
    Show {
        /// Party code
        code: String,
    },
}
