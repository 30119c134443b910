//! Commands typed at the rule card prompt.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCommand {
    Show,
    Edit,
    /// Leave edit mode without saving; goes through the store.
    Discard,
    /// Broadcast a close for this rule as another view would.
    Close,
    Copy,
    Clone,
    Remove,
    ComplexEdit,
    Help,
    Quit,
}

impl CardCommand {
    pub fn name(self) -> &'static str {
        match self {
            CardCommand::Show => "show",
            CardCommand::Edit => "edit",
            CardCommand::Discard => "discard",
            CardCommand::Close => "close",
            CardCommand::Copy => "copy",
            CardCommand::Clone => "clone",
            CardCommand::Remove => "remove",
            CardCommand::ComplexEdit => "complex",
            CardCommand::Help => "help",
            CardCommand::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command '{0}'; type 'help' for a list")]
pub struct UnknownCommand(pub String);

impl FromStr for CardCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim().to_ascii_lowercase().as_str() {
            "" | "show" | "s" => CardCommand::Show,
            "edit" | "e" => CardCommand::Edit,
            "discard" | "cancel" => CardCommand::Discard,
            "close" => CardCommand::Close,
            "copy" => CardCommand::Copy,
            "clone" => CardCommand::Clone,
            "remove" | "rm" => CardCommand::Remove,
            "complex" => CardCommand::ComplexEdit,
            "help" | "?" => CardCommand::Help,
            "quit" | "q" | "exit" => CardCommand::Quit,
            other => return Err(UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
show     render the card
edit     toggle between view and edit mode
discard  leave edit mode without saving
close    broadcast a close notification for this rule
copy     copy the rule
clone    clone the rule
remove   remove the rule and exit
complex  open the formula editor
quit     exit";
