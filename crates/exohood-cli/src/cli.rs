use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "exohood")]
#[command(about = "exohood - preview the embeddable purchase widget")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Effective log level; logs go to stderr so stdout stays clean
    pub fn level(&self) -> Level {
        match (self.verbose, self.log_level) {
            (true, _) => Level::DEBUG,
            (false, Some(level)) => level.into(),
            (false, None) => Level::WARN,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mount the widget into an in-memory page and print its markup
    Render(RenderArgs),

    /// List the event types hosts can subscribe to
    Events {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// JSON file holding the host property bag
    #[arg(short, long)]
    pub props: PathBuf,

    /// Selector of the host element to mount into
    #[arg(short, long, default_value = "#widget")]
    pub selector: String,

    /// Page cookies, `name=value; name2=value2`
    #[arg(long, default_value = "")]
    pub cookies: String,

    /// Make the home view fail, to preview the crash view
    #[arg(long)]
    pub crash: bool,

    /// Activate the reset action after the first render
    #[arg(long)]
    pub reset: bool,

    /// Print the resolved configuration instead of markup
    #[arg(long)]
    pub show_config: bool,
}
