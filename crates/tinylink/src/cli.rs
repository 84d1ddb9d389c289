//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};
use tinylink_core::{SortField, SortOrder};

/// TinyLink - manage and follow short links
#[derive(Debug, Parser)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "Client for the TinyLink short-link service", long_about = None)]
pub struct Cli {
    /// Override the link store URL (TINYLINK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List links, optionally filtered and sorted
    List {
        /// Case-insensitive match on code or target URL
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Sort field: code, target_url, clicks, created_at, last_clicked
        #[arg(long)]
        sort: Option<SortField>,

        /// Sort direction (only used with --sort)
        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },

    /// Create a short link
    Create {
        /// Destination URL
        url: String,

        /// Custom short code (6-8 alphanumeric characters)
        #[arg(long, short = 'c')]
        code: Option<String>,
    },

    /// Delete a short link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show statistics for a short link
    Stats {
        /// Short code to inspect
        code: String,
    },

    /// Resolve a short code through the redirect service
    Open {
        /// Short code to follow
        code: String,
    },

    /// Query the link store health endpoint
    Health,
}
