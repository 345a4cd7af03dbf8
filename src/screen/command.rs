//! Screen Commands
//!
//! Text commands accepted by the interactive terminal screen.

use std::str::FromStr;
use thiserror::Error;

use crate::aggregate::Granularity;

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Switch the chart to a granularity
    View(Granularity),
    /// Flip between day and month
    Toggle,
    /// Select a latest-tenants row by school id or row number
    Select(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for ScreenCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        match input.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => return Ok(ScreenCommand::Quit),
            "t" | "toggle" => return Ok(ScreenCommand::Toggle),
            _ => {}
        }

        if let Some(target) = input.strip_prefix("select ") {
            let target = target.trim();
            if !target.is_empty() {
                return Ok(ScreenCommand::Select(target.to_string()));
            }
        }

        if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            return Ok(ScreenCommand::Select(input.to_string()));
        }

        input
            .parse::<Granularity>()
            .map(ScreenCommand::View)
            .map_err(|_| UnknownCommand(input.to_string()))
    }
}
