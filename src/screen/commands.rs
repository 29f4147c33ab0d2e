use crate::screen::reducer::Action;
use std::str::FromStr;
use thiserror::Error;

/// What the user can ask for from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    Refresh,
    ToggleTracking,
    Center,
    Verify,
    Quit,
}

impl UiCommand {
    /// `None` for commands the screen itself does not handle.
    pub fn action(self) -> Option<Action> {
        match self {
            UiCommand::Refresh => Some(Action::Refresh),
            UiCommand::ToggleTracking => Some(Action::ToggleTracking),
            UiCommand::Center => Some(Action::Center),
            UiCommand::Verify => Some(Action::VerifyConnection),
            UiCommand::Quit => None,
        }
    }
}

impl FromStr for UiCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refresh" | "r" => Ok(UiCommand::Refresh),
            "track" | "t" => Ok(UiCommand::ToggleTracking),
            "center" | "c" => Ok(UiCommand::Center),
            "verify" | "v" => Ok(UiCommand::Verify),
            "quit" | "q" | "exit" => Ok(UiCommand::Quit),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown command '{0}', expected one of: refresh, track, center, verify, quit")]
pub struct UnknownCommand(String);
