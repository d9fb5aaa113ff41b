//! Interactive month browser.
//!
//! One command per line; network calls block the loop until they finish.

use chrono::NaiveDate;
use inquire::{Confirm, InquireError, Text};
use shared::EventService;
use std::str::FromStr;
use tracing::debug;

use crate::book::EventBook;
use crate::cli::CreateArgs;
use crate::form::EventForm;
use crate::grid::{calendar_days, MonthCursor};
use crate::render;

pub const HELP: &str =
    "n next month, p previous, t today, c create, s <id> show, d <id> delete, r reload, q quit";

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this event? This action cannot be undone.";

pub const DELETE_FAILED: &str = "Failed to delete event. Please try again.";

pub const CREATE_CANCELLED: &str = "Create cancelled.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    Today,
    Create,
    Show(String),
    Delete(String),
    Reload,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next().unwrap_or_default().to_string();

        match verb {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" => Ok(Self::Prev),
            "t" | "today" => Ok(Self::Today),
            "c" | "create" | "new" => Ok(Self::Create),
            "s" | "show" if !arg.is_empty() => Ok(Self::Show(arg)),
            "d" | "delete" => Ok(Self::Delete(arg)),
            "r" | "reload" => Ok(Self::Reload),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            "s" | "show" => Err("Usage: s <event id>".to_string()),
            _ => Err(format!("Unknown command '{}'. {}", line.trim(), HELP)),
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Print the message and wait for the next command.
    Say(String),
    /// Print the optional message, then the refreshed month.
    Redraw(Option<String>),
    /// Ask the user for a new event's fields.
    PromptForm,
    Quit,
}

/// Month cursor, the events fetched for display and the create form in use.
pub struct Browser {
    cursor: MonthCursor,
    today: NaiveDate,
    book: EventBook,
    draft: EventForm,
}

impl Browser {
    pub fn new(today: NaiveDate, book: EventBook) -> Self {
        Self {
            cursor: MonthCursor::containing(today),
            today,
            book,
            draft: EventForm::new(),
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn book(&self) -> &EventBook {
        &self.book
    }

    /// The month grid followed by the per-day listing.
    pub fn screen(&self) -> String {
        let days = calendar_days(self.cursor, self.book.events(), self.today);
        format!(
            "{}\n{}",
            render::month_grid(self.cursor, &days),
            render::day_listing(&days)
        )
    }

    pub async fn apply<S: EventService>(&mut self, service: &S, command: BrowseCommand) -> Step {
        debug!("Browse command: {:?}", command);

        match command {
            BrowseCommand::Next => {
                self.cursor = self.cursor.next();
                Step::Redraw(None)
            }
            BrowseCommand::Prev => {
                self.cursor = self.cursor.prev();
                Step::Redraw(None)
            }
            BrowseCommand::Today => {
                self.cursor = MonthCursor::containing(self.today);
                Step::Redraw(None)
            }
            BrowseCommand::Create if self.draft.is_submitting() => {
                Step::Say("Event is already being submitted".to_string())
            }
            BrowseCommand::Create => Step::PromptForm,
            BrowseCommand::Show(id) => match self.book.find(&id) {
                Some(event) => Step::Say(render::event_details(event)),
                None => Step::Say(format!("No event with ID {} in the calendar.", id)),
            },
            BrowseCommand::Delete(id) => match self.book.delete(service, &id).await {
                Ok(()) => Step::Redraw(Some("Event deleted successfully!".to_string())),
                Err(e) => Step::Say(format!("{}\n{}", DELETE_FAILED, e)),
            },
            BrowseCommand::Reload => match self.book.reload(service).await {
                Ok(count) => Step::Redraw(Some(format!("Loaded {} events.", count))),
                Err(e) => Step::Say(format!("{} Type 'r' to retry.", e)),
            },
            BrowseCommand::Help => Step::Say(HELP.to_string()),
            BrowseCommand::Quit => Step::Quit,
        }
    }

    /// Take the outcome of the create prompt: submit a filled form, or note a cancel.
    pub async fn create<S: EventService>(
        &mut self,
        service: &S,
        prompted: Result<EventForm, InquireError>,
    ) -> Result<Step, InquireError> {
        match prompted {
            Ok(form) => Ok(self.submit(service, form).await),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Step::Say(CREATE_CANCELLED.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Submit a filled form and add the server's record to the calendar.
    pub async fn submit<S: EventService>(&mut self, service: &S, form: EventForm) -> Step {
        if self.draft.is_submitting() {
            return Step::Say("Error: Event is already being submitted".to_string());
        }
        self.draft = form;

        match self.draft.submit(service).await {
            Ok(event) => {
                self.book.append(event);
                Step::Redraw(Some("Event created successfully!".to_string()))
            }
            Err(e) => Step::Say(format!("Error: {}", e)),
        }
    }
}

/// Run the browser until the user quits or closes the prompt.
pub async fn run<S: EventService>(service: &S, today: NaiveDate) -> anyhow::Result<()> {
    let mut browser = Browser::new(today, EventBook::default());

    let mut step = browser.apply(service, BrowseCommand::Reload).await;
    loop {
        match step {
            Step::Quit => return Ok(()),
            Step::Say(message) => println!("{}", message),
            Step::Redraw(message) => {
                if let Some(message) = message {
                    println!("{}", message);
                }
                println!("{}", browser.screen());
            }
            Step::PromptForm => {
                let prompted = EventForm::prompt(CreateArgs::default());
                step = browser.create(service, prompted).await?;
                continue;
            }
        }

        let line = match Text::new("calendar>").with_help_message(HELP).prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        step = match line.parse::<BrowseCommand>() {
            Ok(BrowseCommand::Delete(id)) if !id.is_empty() => {
                if Confirm::new(DELETE_CONFIRMATION).with_default(false).prompt()? {
                    browser.apply(service, BrowseCommand::Delete(id)).await
                } else {
                    Step::Say("Delete cancelled.".to_string())
                }
            }
            Ok(command) => browser.apply(service, command).await,
            Err(message) => Step::Say(message),
        };
    }
}
