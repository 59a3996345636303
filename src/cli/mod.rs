pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "Look up court hearings and keep file number bookmarks", long_about = None)]
pub struct Cli {
    /// Path to the local bookmark database
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the hearings for a court file number
    Hearings {
        /// Court file number, e.g. CF-1234
        file_number: String,
    },
    /// Check whether a court file number is bookmarked
    Status {
        file_number: String,
    },
    /// Toggle the bookmark on a court file number
    Bookmark {
        file_number: String,
    },
    /// List locally cached bookmarks
    Bookmarks,
    /// Render a hearing time the way the hearing list shows it
    Time {
        /// e.g. 2020-01-15T03:15:00Z
        datetime: String,
        /// Raw UTC offset, e.g. -0500
        #[arg(allow_hyphen_values = true)]
        offset: String,
    },
}
