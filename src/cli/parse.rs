//! CLI parse: clap types for Baize. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{EngagementLevel, JourneyStage};

/// Baize CLI - context-driven content personalization engine
#[derive(Parser)]
#[command(name = "baize")]
#[command(about = "Context-driven content personalization and offline booking engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and mutate the context state
    Context {
        #[command(subcommand)]
        command: ContextCommands,
    },
    /// Rank content modules against the current context
    Rank {
        /// Module manifest file (JSON array); defaults to the built-in manifest
        #[arg(long)]
        modules: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Manage CMS content
    Cms {
        #[command(subcommand)]
        command: CmsCommands,
    },
    /// Submit and sync bookings
    Booking {
        #[command(subcommand)]
        command: BookingCommands,
    },
}

#[derive(Subcommand)]
pub enum ContextCommands {
    /// Show the current context state
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Record a page visit (engagement is re-classified afterwards)
    Visit {
        /// Page identifier, e.g. "training"
        page: String,
        /// Dwell time on the page in milliseconds
        #[arg(long, default_value = "0")]
        duration_ms: u64,
    },
    /// Replace the interest set
    Interests {
        /// Interest categories, e.g. training products
        interests: Vec<String>,
    },
    /// Set the engagement level
    Engagement { level: EngagementLevel },
    /// Set the journey stage
    Journey { stage: JourneyStage },
    /// Set the resonance score (clamped to [0, 1])
    Resonance { value: f64 },
    /// Recompute and store next-action recommendations
    Recommend,
    /// Discard the persisted context snapshot
    Reset,
}

#[derive(Subcommand)]
pub enum CmsCommands {
    /// Show one content entry
    Get { key: String },
    /// Update the value of an existing entry
    Set { key: String, value: String },
    /// List entries, optionally filtered by category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Export all content as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Import content from a JSON file
    Import { input: PathBuf },
    /// Reset one key (or all content) back to defaults
    Reset {
        /// Key to reset; omit to reset everything
        key: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// Submit a booking (queued locally when delivery fails)
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// ISO date, e.g. 2026-09-01
        #[arg(long)]
        date: String,
        /// Time slot, e.g. 18:30
        #[arg(long)]
        time: String,
        #[arg(long)]
        store: Option<String>,
        #[arg(long)]
        coach: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Replay all queued bookings
    Sync,
    /// List queued-unsynced bookings
    Pending,
}
