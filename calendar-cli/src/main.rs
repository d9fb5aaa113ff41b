//! Calendar CLI - create, browse and delete events on the events API.

mod book;
mod browse;
mod cli;
mod form;
mod grid;
mod render;

use anyhow::Context;
use chrono::{Datelike, Local};
use clap::Parser;
use inquire::Confirm;
use shared::{ClientConfig, EventApi, EventService};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::book::EventBook;
use crate::cli::{Cli, Commands, CreateArgs};
use crate::form::EventForm;
use crate::grid::{calendar_days, MonthCursor};

fn client_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(endpoint) = &cli.endpoint {
        config.event_endpoint = endpoint.clone();
        if cli.feed.is_none() {
            config.calendar_endpoint = endpoint.clone();
        }
    }
    if let Some(feed) = &cli.feed {
        config.calendar_endpoint = feed.clone();
    }
    Ok(config)
}

async fn print_month(api: &EventApi, year: Option<i32>, month: Option<u32>) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let cursor = MonthCursor::new(year.unwrap_or(today.year()), month.unwrap_or(today.month()));

    let mut book = EventBook::default();
    book.reload(api).await?;

    let days = calendar_days(cursor, book.events(), today);
    println!("{}", render::month_grid(cursor, &days));
    print!("{}", render::day_listing(&days));
    Ok(())
}

async fn create(api: &EventApi, args: CreateArgs) -> anyhow::Result<()> {
    let mut form = EventForm::prompt(args)?;

    match form.submit(api).await {
        Ok(event) => {
            println!("Event created successfully!");
            print!("{}", render::event_details(&event));
            Ok(())
        }
        Err(e) => {
            println!("Error: {}", e);
            Err(e.into())
        }
    }
}

/// Delete without a prior fetch; the local list only supplies the id checks.
async fn delete<S: EventService>(service: &S, id: &str, yes: bool) -> anyhow::Result<()> {
    if !yes && !Confirm::new(browse::DELETE_CONFIRMATION).with_default(false).prompt()? {
        println!("Delete cancelled.");
        return Ok(());
    }

    let mut book = EventBook::default();
    match book.delete(service, id).await {
        Ok(()) => {
            println!("Event deleted successfully!");
            Ok(())
        }
        Err(e) => {
            println!("{}", browse::DELETE_FAILED);
            Err(e).context(format!("deleting {}", id))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = EventApi::new(client_config(&cli)?)?;

    let result = match cli.command {
        Commands::Month { year, month } => print_month(&api, year, month).await,
        Commands::Browse => browse::run(&api, Local::now().date_naive()).await,
        Commands::Create(args) => create(&api, args).await,
        Commands::Show { id } => {
            let event = api.get_event(&id).await?;
            print!("{}", render::event_details(&event));
            Ok(())
        }
        Commands::Delete { id, yes } => delete(&api, &id, yes).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
