//! Terminal front end state: the two calculator tabs and the commands that
//! drive them.

use std::fmt;
use std::sync::Arc;

use finance_core::keypad::{Key, ParseKeyError};
use finance_core::models::{CompoundField, InputField, MortgageField};
use finance_core::{KeyValueStore, StoreError};
use thiserror::Error;
use tracing::{debug, info};

use crate::screens::{Alert, CompoundInterestScreen, MessageType, MortgageScreen, ScreenError};

pub const HELP: &str = "\
Commands:
  tab <compound|mortgage>   switch calculator
  focus <field>             route keypad input to a field
  key <k>...                press keys: 0-9, '.', del, neg
  set <field> [text]        replace a field's text
  calc                      solve for the one blank field
  save                      add the current fields to the history
  clear                     blank all fields
  history                   list saved calculations
  show                      redraw the current screen
  help                      show this text
  quit                      exit

Fields:
  compound: present, future, rate, payments
  mortgage: amount, rate, payments, payment";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    CompoundInterest,
    Mortgage,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::CompoundInterest, Tab::Mortgage];

    pub fn label(self) -> &'static str {
        match self {
            Tab::CompoundInterest => CompoundInterestScreen::TITLE,
            Tab::Mortgage => MortgageScreen::TITLE,
        }
    }

    fn from_command_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "compound" | "compound-interest" => Some(Tab::CompoundInterest),
            "mortgage" => Some(Tab::Mortgage),
            _ => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}.")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Unknown tab '{0}' (expected 'compound' or 'mortgage').")]
    UnknownTab(String),

    #[error("The {tab} screen has no field '{name}'.")]
    UnknownField { tab: Tab, name: String },

    #[error(transparent)]
    InvalidKey(#[from] ParseKeyError),
}

/// One line of user input.
///
/// Field names are kept as typed; they are resolved against the active
/// tab when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Focus(String),
    Keys(Vec<Key>),
    Set { field: String, text: String },
    Calculate,
    Save,
    Clear,
    History,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Show);
        };

        match name.to_ascii_lowercase().as_str() {
            "tab" => {
                let tab = words.next().ok_or(CommandError::MissingArgument {
                    command: "tab",
                    argument: "a tab name",
                })?;
                Tab::from_command_name(tab)
                    .map(Command::Tab)
                    .ok_or_else(|| CommandError::UnknownTab(tab.to_string()))
            }
            "focus" => words
                .next()
                .map(|field| Command::Focus(field.to_string()))
                .ok_or(CommandError::MissingArgument {
                    command: "focus",
                    argument: "a field name",
                }),
            "key" | "keys" => {
                let keys = words.map(Key::parse).collect::<Result<Vec<_>, _>>()?;
                if keys.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "key",
                        argument: "at least one key",
                    });
                }
                Ok(Command::Keys(keys))
            }
            "set" => {
                let field = words.next().ok_or(CommandError::MissingArgument {
                    command: "set",
                    argument: "a field name",
                })?;
                Ok(Command::Set {
                    field: field.to_string(),
                    text: words.collect::<Vec<_>>().join(" "),
                })
            }
            "calc" | "calculate" => Ok(Command::Calculate),
            "save" => Ok(Command::Save),
            "clear" => Ok(Command::Clear),
            "history" => Ok(Command::History),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::UnknownCommand(name.to_string())),
        }
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Alert(Alert),
    Text(String),
    Quit,
}

/// Both calculator screens, sharing one store, and the active tab.
pub struct Session {
    active: Tab,
    compound: CompoundInterestScreen,
    mortgage: MortgageScreen,
}

impl Session {
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let compound = CompoundInterestScreen::load(store.clone()).await?;
        let mortgage = MortgageScreen::load(store).await?;
        Ok(Self {
            active: Tab::default(),
            compound,
            mortgage,
        })
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn compound(&self) -> &CompoundInterestScreen {
        &self.compound
    }

    pub fn mortgage(&self) -> &MortgageScreen {
        &self.mortgage
    }

    /// Runs one command against the active screen.
    ///
    /// Calculation and validation failures come back as an alert. Only
    /// storage failures are returned as errors.
    pub async fn execute(
        &mut self,
        command: Command,
    ) -> Result<Response, StoreError> {
        debug!(?command, tab = %self.active, "execute");
        match command {
            Command::Tab(tab) => {
                self.active = tab;
                Ok(self.render())
            }
            Command::Focus(name) => match self.active {
                Tab::CompoundInterest => match resolve::<CompoundField>(self.active, &name) {
                    Ok(field) => {
                        self.compound.focus(field);
                        Ok(self.render())
                    }
                    Err(e) => Ok(command_error(&e)),
                },
                Tab::Mortgage => match resolve::<MortgageField>(self.active, &name) {
                    Ok(field) => {
                        self.mortgage.focus(field);
                        Ok(self.render())
                    }
                    Err(e) => Ok(command_error(&e)),
                },
            },
            Command::Keys(keys) => {
                for key in keys {
                    match self.active {
                        Tab::CompoundInterest => self.compound.press(key).await?,
                        Tab::Mortgage => self.mortgage.press(key).await?,
                    };
                }
                Ok(self.render())
            }
            Command::Set { field, text } => match self.active {
                Tab::CompoundInterest => match resolve::<CompoundField>(self.active, &field) {
                    Ok(field) => {
                        self.compound.set_text(field, &text).await?;
                        Ok(self.render())
                    }
                    Err(e) => Ok(command_error(&e)),
                },
                Tab::Mortgage => match resolve::<MortgageField>(self.active, &field) {
                    Ok(field) => {
                        self.mortgage.set_text(field, &text).await?;
                        Ok(self.render())
                    }
                    Err(e) => Ok(command_error(&e)),
                },
            },
            Command::Calculate => {
                let alert = match self.active {
                    Tab::CompoundInterest => self
                        .compound
                        .calculate()
                        .map_or_else(|e| Alert::from(&e), |s| Alert::solved(&s)),
                    Tab::Mortgage => self
                        .mortgage
                        .calculate()
                        .map_or_else(|e| Alert::from(&e), |s| Alert::solved(&s)),
                };
                Ok(Response::Alert(alert))
            }
            Command::Save => {
                let result = match self.active {
                    Tab::CompoundInterest => self.compound.save().await,
                    Tab::Mortgage => self.mortgage.save().await,
                };
                match result {
                    Ok(outcome) => {
                        info!(tab = %self.active, entries = outcome.entries, "history saved");
                        Ok(Response::Alert(Alert::saved()))
                    }
                    Err(ScreenError::Save(e)) => Ok(Response::Alert(Alert::from(&e))),
                    Err(ScreenError::Store(e)) => Err(e),
                }
            }
            Command::Clear => {
                match self.active {
                    Tab::CompoundInterest => self.compound.clear(),
                    Tab::Mortgage => self.mortgage.clear(),
                }
                Ok(self.render())
            }
            Command::History => Ok(Response::Text(self.history_text())),
            Command::Show => Ok(self.render()),
            Command::Help => Ok(Response::Text(HELP.to_string())),
            Command::Quit => Ok(Response::Quit),
        }
    }

    fn render(&self) -> Response {
        Response::Text(self.to_string())
    }

    fn history_text(&self) -> String {
        let history = match self.active {
            Tab::CompoundInterest => self.compound.history(),
            Tab::Mortgage => self.mortgage.history(),
        };
        if history.is_empty() {
            return format!("No saved {} calculations.", self.active);
        }
        history
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{:>3}. {entry}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn resolve<F: InputField>(
    tab: Tab,
    name: &str,
) -> Result<F, CommandError> {
    F::from_command_name(name).ok_or_else(|| CommandError::UnknownField {
        tab,
        name: name.to_string(),
    })
}

fn command_error(error: &CommandError) -> Response {
    Response::Alert(Alert::new(MessageType::Error, error.to_string()))
}

impl fmt::Display for Session {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let tabs: Vec<String> = Tab::ALL
            .into_iter()
            .map(|tab| {
                if tab == self.active {
                    format!("[{tab}]")
                } else {
                    format!(" {tab} ")
                }
            })
            .collect();
        writeln!(f, "{}", tabs.join(" "))?;
        match self.active {
            Tab::CompoundInterest => write!(f, "{}", self.compound),
            Tab::Mortgage => write!(f, "{}", self.mortgage),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_tab() {
        assert_eq!(Command::parse("tab mortgage"), Ok(Command::Tab(Tab::Mortgage)));
        assert_eq!(
            Command::parse("TAB Compound"),
            Ok(Command::Tab(Tab::CompoundInterest))
        );
    }

    #[test]
    fn parse_unknown_tab() {
        assert_eq!(
            Command::parse("tab savings"),
            Err(CommandError::UnknownTab("savings".to_string()))
        );
    }

    #[test]
    fn parse_keys() {
        assert_eq!(
            Command::parse("key 1 2 . 5 del neg"),
            Ok(Command::Keys(vec![
                Key::Digit(1),
                Key::Digit(2),
                Key::Period,
                Key::Digit(5),
                Key::Delete,
                Key::Negate,
            ]))
        );
    }

    #[test]
    fn parse_keys_requires_a_key() {
        assert!(matches!(
            Command::parse("key"),
            Err(CommandError::MissingArgument { command: "key", .. })
        ));
    }

    #[test]
    fn parse_bad_key() {
        assert!(matches!(
            Command::parse("key 1 x"),
            Err(CommandError::InvalidKey(_))
        ));
    }

    #[test]
    fn parse_set_keeps_text() {
        assert_eq!(
            Command::parse("set present 1000"),
            Ok(Command::Set {
                field: "present".to_string(),
                text: "1000".to_string(),
            })
        );
    }

    #[test]
    fn parse_set_without_text_blanks_field() {
        assert_eq!(
            Command::parse("set future"),
            Ok(Command::Set {
                field: "future".to_string(),
                text: String::new(),
            })
        );
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("calc"), Ok(Command::Calculate));
        assert_eq!(Command::parse("save"), Ok(Command::Save));
        assert_eq!(Command::parse("clear"), Ok(Command::Clear));
        assert_eq!(Command::parse("history"), Ok(Command::History));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("   "), Ok(Command::Show));
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(
            Command::parse("frobnicate"),
            Err(CommandError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn unknown_field_message_names_the_tab() {
        let error = resolve::<MortgageField>(Tab::Mortgage, "future").unwrap_err();

        assert_eq!(error.to_string(), "The Mortgage screen has no field 'future'.");
    }
}
