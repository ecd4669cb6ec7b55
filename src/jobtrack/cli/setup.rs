use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "jobtrack", bin_name = "jobtrack", version = get_version())]
#[command(
    about = "Track job applications: search, filter, sort, page and edit in place",
    long_about = "Starts an interactive session. Commands are read line by line from \
                  stdin; type `help` for the list. Nothing is saved when the session ends; \
                  use `export` to keep a copy."
)]
pub struct Cli {
    /// JSON file of applications to load when the session starts
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Rows per page for this session, overriding the configured value
    #[arg(long, value_name = "N")]
    pub page_size: Option<NonZeroUsize>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One line of session input.
#[derive(Parser, Debug)]
#[command(multicall = true, disable_help_subcommand = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Add a job application
    #[command(alias = "a")]
    Add {
        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// Job title
        #[arg(long)]
        title: Option<String>,

        /// Full-time, Internship, Part-time or Contract
        #[arg(long = "type", value_name = "TYPE")]
        job_type: Option<String>,

        /// Applied, "Interview Scheduled", Rejected or Selected
        #[arg(long)]
        status: Option<String>,

        /// Location
        #[arg(long)]
        location: Option<String>,

        /// Applied date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the current page
    #[command(alias = "ls")]
    List,

    /// Search company names and job titles (no term clears the search)
    Search { term: Vec<String> },

    /// Filter by job type and/or status ("all" clears one, no options clear both)
    Filter {
        #[arg(long = "type", value_name = "TYPE")]
        job_type: Option<String>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Sort by company or date; the active key again, or "none", turns sorting off
    Sort { key: String },

    /// Jump to a page
    Page { number: usize },

    /// Next page
    #[command(alias = "n")]
    Next,

    /// Previous page
    #[command(alias = "p")]
    Prev,

    /// Delete a row from the current page (asks first unless -y)
    #[command(alias = "rm")]
    Delete {
        /// Row number or application id
        row: String,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Start editing a row inline
    #[command(alias = "e")]
    Edit {
        /// Row number or application id
        row: String,
    },

    /// Change a field of the open edit
    Set {
        /// companyName, jobTitle, jobType, status, location, appliedDate or notes
        field: String,

        /// New value (may be empty)
        value: Vec<String>,
    },

    /// Show the open edit
    Show,

    /// Save the open edit
    Save,

    /// Discard the open edit
    Cancel,

    /// Totals per status and the most recent applications
    #[command(alias = "dash")]
    Dashboard,

    /// Add applications from a JSON file
    Import { path: PathBuf },

    /// Write all applications as JSON (to stdout without a path)
    Export { path: Option<PathBuf> },

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, log-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// List session commands
    Help,

    /// End the session
    #[command(alias = "exit", alias = "q")]
    Quit,
}
