//! Line-oriented session commands
//!
//! Grammar, one command per line:
//!
//! ```text
//! park <motorcycle|car|ev> <plate> [owner...] [--charging]
//! unpark <ticket-id>
//! reserve <plate> <hours> [slot-id]
//! status
//! report
//! export [path]
//! help
//! exit | quit
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Plates cannot
//! contain spaces in this form; the menu shell has no such restriction.

use crate::cli::handlers::ParkParams;
use crate::cli::handlers::validation::parse_hours;
use crate::error::{ParkingError, Result};
use std::path::PathBuf;

/// One operator action
#[derive(Debug, Clone)]
pub enum SessionCommand {
    Park(ParkParams),
    Unpark {
        ticket: String,
    },
    Reserve {
        plate: String,
        hours: u32,
        slot: Option<String>,
    },
    Status,
    Report,
    Export {
        path: Option<PathBuf>,
    },
    Help,
    Exit,
}

impl SessionCommand {
    /// Parse one input line; `None` for blank lines and comments
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut charging = false;
        let words: Vec<&str> = line
            .split_whitespace()
            .filter(|word| {
                let is_flag = *word == "--charging";
                charging |= is_flag;
                !is_flag
            })
            .collect();

        let command = match words.as_slice() {
            ["park", kind, plate, owner @ ..] => Self::Park(ParkParams {
                kind: (*kind).to_string(),
                plate: (*plate).to_string(),
                owner: owner.join(" "),
                charging,
            }),
            ["park", ..] => {
                return Err(usage(
                    "park <motorcycle|car|ev> <plate> [owner] [--charging]",
                ));
            },
            ["unpark", ticket] => Self::Unpark {
                ticket: (*ticket).to_string(),
            },
            ["unpark", ..] => return Err(usage("unpark <ticket-id>")),
            ["reserve", plate, hours] => Self::Reserve {
                plate: (*plate).to_string(),
                hours: parse_hours(hours)?,
                slot: None,
            },
            ["reserve", plate, hours, slot] => Self::Reserve {
                plate: (*plate).to_string(),
                hours: parse_hours(hours)?,
                slot: Some((*slot).to_string()),
            },
            ["reserve", ..] => return Err(usage("reserve <plate> <hours> [slot-id]")),
            ["status"] => Self::Status,
            ["report"] => Self::Report,
            ["export"] => Self::Export { path: None },
            ["export", path] => Self::Export {
                path: Some(PathBuf::from(path)),
            },
            ["help" | "?"] => Self::Help,
            ["exit" | "quit"] => Self::Exit,
            [other, ..] => {
                return Err(ParkingError::InvalidInput(format!(
                    "Unknown command: {other}. Type 'help' for available commands"
                )));
            },
            [] => return Ok(None),
        };

        if charging && !matches!(command, Self::Park(_)) {
            return Err(ParkingError::InvalidInput(
                "--charging is only valid for park".to_string(),
            ));
        }

        Ok(Some(command))
    }
}

fn usage(form: &str) -> ParkingError {
    ParkingError::InvalidInput(format!("Usage: {form}"))
}

/// Help text for the line-oriented commands
pub const HELP: &str = "\
Available commands:
  park <motorcycle|car|ev> <plate> [owner] [--charging]
  unpark <ticket-id>
  reserve <plate> <hours> [slot-id]
  status
  report
  export [path]
  help
  exit";
