use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tieba",
    about = "Tieba client core: headless forum front end driven from the terminal",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file; defaults apply when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the redirect URL for a search
    Search(SearchArgs),
    /// Decode a page URL into its route
    Route(RouteArgs),
    /// Validate form fields given as name=value
    Validate(ValidateArgs),
    /// Read or write the preference store
    Prefs(PrefsArgs),
    /// Run a scripted session and print what the page would show
    Demo(DemoArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    pub query: Vec<String>,
}

#[derive(Args)]
pub struct RouteArgs {
    pub url: String,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Fields as name=value
    pub fields: Vec<String>,
    /// Also check that password and confirm-password match
    #[arg(long)]
    pub register: bool,
    /// Names of the required fields; every field is required when omitted
    #[arg(long, value_delimiter = ',')]
    pub required: Vec<String>,
}

#[derive(Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub action: PrefsAction,
}

#[derive(Subcommand)]
pub enum PrefsAction {
    Get { key: String },
    /// Store a JSON value (plain text is stored as a string)
    Set { key: String, value: String },
    Remove { key: String },
    List,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Playback speed; 2 runs twice as fast as real time
    #[arg(long, default_value = "1.0")]
    pub speed: f64,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Also write the effective configuration to this file
    #[arg(long)]
    pub file: Option<PathBuf>,
}
