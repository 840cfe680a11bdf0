use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cellar", bin_name = "cellar", version)]
#[command(about = "Keep track of the wines in your fridge, rack or cellar", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (info-level logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure storage from a description, a layout file, or the default grid
    Setup {
        /// Free-text description, or a JSON layout
        description: Option<String>,

        /// Read a JSON layout from this file
        #[arg(long, conflicts_with = "description")]
        file: Option<PathBuf>,

        /// Use the default layout (White Wine Zone W1-W6, Red Wine Zone R1-R6)
        #[arg(long, conflicts_with_all = ["description", "file"])]
        default: bool,
    },

    /// Add a wine
    Add {
        /// Wine name
        name: String,

        /// Description (grape, region, tasting notes...)
        #[arg(short, long, default_value = "")]
        description: String,

        /// Put it here instead of the suggested position (e.g. W3)
        #[arg(short, long)]
        position: Option<String>,

        /// Do not assign a position
        #[arg(long, conflicts_with = "position")]
        unpositioned: bool,
    },

    /// Read a label (JSON with name and description) and suggest a position
    Scan {
        /// Label file
        file: PathBuf,
    },

    /// Suggest a position for a wine description
    Suggest {
        description: String,
    },

    /// List wines
    #[command(alias = "ls")]
    List {
        /// Include consumed wines
        #[arg(short, long)]
        all: bool,
    },

    /// Show every position, grouped by zone
    Positions,

    /// Mark a wine as consumed
    Consume {
        /// List number, name, or id
        wine: String,
    },

    /// Move a wine to another position (swapping if it is taken)
    #[command(name = "move", alias = "mv")]
    Move {
        /// List number, name, or id
        wine: String,
        /// Position identifier or id
        position: String,
    },

    /// Permanently delete a wine record
    #[command(alias = "rm")]
    Delete {
        /// List number, name, or id
        wine: String,
    },

    /// Show collection and storage counts
    Status,

    /// Check and repair position occupancy
    Doctor,

    /// Print a sample configuration file
    Config,
}
