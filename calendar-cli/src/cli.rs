use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "calendar", version, about = "Create and browse calendar events")]
pub struct Cli {
    /// Create/delete endpoint
    #[arg(long, global = true, env = "EVENT_API_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Read endpoint returning the event list
    #[arg(long, global = true, env = "CALENDAR_FEED_ENDPOINT")]
    pub feed: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a month grid with its events
    Month {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
        /// 1 to 12, defaults to the current month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Navigate months and manage events interactively
    Browse,
    /// Create an event, prompting for anything not given
    Create(CreateArgs),
    /// Show one event
    Show { id: String },
    /// Delete an event
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// Start time, HH:MM (24-hour)
    #[arg(long)]
    pub start: Option<String>,
    /// End time, HH:MM (24-hour)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub link: Option<String>,
}
