use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fieldtools")]
#[command(about = "Coordinate, date and timezone helpers for field data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path (overrides the config file)")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: ./fieldtools.toml if present]")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert DMS strings to decimal degrees
    Dms {
        #[arg(required = true, allow_hyphen_values = true)]
        inputs: Vec<String>,

        #[arg(long, help = "Print one JSON object per input")]
        json: bool,
    },

    /// Convert a file of coordinates (one per line) to CSV
    Convert {
        #[arg(short, long, help = "Input text file, one coordinate per line")]
        input_file: PathBuf,

        #[arg(short, long, help = "Output CSV file [default: <input>.csv]")]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Worker threads [default: from settings]")]
        max_workers: Option<usize>,

        #[arg(long, default_value = "false", help = "Abort on the first bad line")]
        strict: bool,

        #[arg(short, long, default_value = "false", help = "Hide the progress bar")]
        quiet: bool,
    },

    /// Decode an HTTP query string
    Query {
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Show how plain strings coerce to numbers
    Coerce {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Lay items out in columns, filled top to bottom
    Rows {
        #[arg(short, long, default_value = "3")]
        columns: usize,

        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Resolve a day of year (1-366) to a Gregorian date in the nearest year
    Year {
        day: u32,

        #[arg(long, help = "Reference date (YYYY-MM-DD) [default: today]")]
        date: Option<String>,
    },

    /// Inspect timezone rules from a JSON registry export
    Tz {
        #[arg(short, long, help = "Registry export [default: from settings]")]
        registry: Option<PathBuf>,

        #[arg(help = "Zone key; lists all zones when omitted")]
        name: Option<String>,

        #[arg(long, help = "Local time to convert (YYYY-MM-DDTHH:MM:SS)")]
        at: Option<String>,
    },
}
