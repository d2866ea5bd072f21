use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Contact-form feedback store for a portfolio site", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./folio.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend: document or table
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Match name, email or message (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this contact type (e.g. general, support)
    #[arg(short = 't', long = "type")]
    pub contact_type: Option<String>,

    /// today, week or month
    #[arg(short, long)]
    pub range: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store a feedback entry
    #[command(alias = "n")]
    Submit {
        /// Visitor's full name
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        /// Contact type (e.g. general, support, business)
        #[arg(short = 't', long = "type", default_value = "general")]
        contact_type: String,

        /// The message
        #[arg(long)]
        comment: String,
    },

    /// List feedback, newest first
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete feedback entries by id
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Export feedback as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file, "-" for stdout (defaults to feedback_export_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create the storage file or database
    Init,

    /// Show the effective configuration
    Config,
}
