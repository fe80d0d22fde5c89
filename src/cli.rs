use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nomen",
    about = "Find known names in text with locale-aware boundaries",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan text files against a roster and print matches as JSON lines
    Scan {
        /// Roster file: a JSON array of entities (id, name, company?, ...)
        #[arg(short, long)]
        roster: String,

        /// Text files to scan; reads stdin when omitted
        files: Vec<String>,

        /// Enable the token-window exact strategy
        #[arg(long)]
        word_exact: bool,

        /// Enable the fuzzy (typo-tolerant) strategy
        #[arg(long)]
        fuzzy: bool,
    },

    /// Scan and print engine counters instead of matches
    Stats {
        /// Roster file: a JSON array of entities
        #[arg(short, long)]
        roster: String,

        /// Text files to scan
        files: Vec<String>,
    },
}
