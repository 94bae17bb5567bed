//! Interactive sessions for parking-ledger
//!
//! [`ParkingShell`] is the guided menu loop; [`run_batch`] executes the same
//! actions from line-oriented input. Both keep one ledger alive for the
//! whole session and treat errors as recoverable: the error is printed and
//! the next action is read.

mod command;

pub use command::{HELP, SessionCommand};

use crate::cli::OutputFormatter;
use crate::cli::handlers::{
    HandlerContext, ParkParams, handle_export, handle_park, handle_report, handle_reserve,
    handle_status, handle_unpark,
};
use crate::error::{ParkingError, Result};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;

/// Whether the session should keep reading actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Execute one session command against the context
pub fn execute(ctx: &mut HandlerContext, command: SessionCommand) -> Result<Flow> {
    debug!("Executing {command:?}");
    match command {
        SessionCommand::Park(params) => {
            handle_park(ctx, params)?;
        },
        SessionCommand::Unpark { ticket } => {
            handle_unpark(ctx, &ticket)?;
        },
        SessionCommand::Reserve { plate, hours, slot } => {
            handle_reserve(ctx, &plate, hours, slot.as_deref())?;
        },
        SessionCommand::Status => {
            handle_status(ctx)?;
        },
        SessionCommand::Report => {
            handle_report(ctx)?;
        },
        SessionCommand::Export { path } => {
            handle_export(ctx, path.as_deref(), None)?;
        },
        SessionCommand::Help => ctx.info(HELP),
        SessionCommand::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

/// Print an error with its suggestions
pub fn report_error(formatter: &OutputFormatter, error: &ParkingError) {
    formatter.error(&error.user_message());
    for suggestion in error.suggestions() {
        formatter.warning(&format!("  • {suggestion}"));
    }
}

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Run commands from `input` until it ends or an `exit` line is read
///
/// Failing lines, including lines that are not valid UTF-8, are reported
/// with their line number and skipped. Only a read error ends the batch.
pub fn run_batch(ctx: &mut HandlerContext, input: impl BufRead) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (index, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes?;
        let outcome = String::from_utf8(bytes)
            .map_err(|_| ParkingError::InvalidInput("line is not valid UTF-8".to_string()))
            .and_then(|line| SessionCommand::parse_line(&line))
            .and_then(|command| match command {
                Some(command) => execute(ctx, command).map(Some),
                None => Ok(None),
            });

        match outcome {
            Ok(None) => {},
            Ok(Some(flow)) => {
                summary.executed += 1;
                if flow == Flow::Exit {
                    break;
                }
            },
            Err(error) => {
                summary.failed += 1;
                ctx.error(&format!("line {}: {}", index + 1, error.user_message()));
            },
        }
    }

    debug!(
        "Batch finished: {} executed, {} failed",
        summary.executed, summary.failed
    );
    Ok(summary)
}

const MENU: [&str; 7] = [
    "Park vehicle",
    "Unpark vehicle",
    "Reserve VIP slot",
    "Slot status",
    "Daily report",
    "Export tickets (CSV)",
    "Exit",
];

const VEHICLE_KINDS: [&str; 3] = ["Motorcycle", "Car", "EV"];

/// Guided menu loop
pub struct ParkingShell {
    theme: ColorfulTheme,
    context: HandlerContext,
}

impl ParkingShell {
    /// Create a new shell around a session context
    pub fn new(context: HandlerContext) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            context,
        }
    }

    /// Run the menu until the operator exits
    ///
    /// Errors from an action are printed and the menu is shown again. A
    /// failure of the menu prompt itself (no terminal) ends the session.
    pub fn run(&mut self) -> Result<()> {
        println!("🅿️  parking-ledger\n");

        loop {
            let selection = Select::with_theme(&self.theme)
                .with_prompt("What would you like to do?")
                .items(&MENU)
                .default(0)
                .interact()?;

            let outcome = self
                .prompt_command(selection)
                .and_then(|command| execute(&mut self.context, command));

            match outcome {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {},
                Err(error) => report_error(&self.context.formatter, &error),
            }
            println!();
        }

        println!("👋 Goodbye!");
        Ok(())
    }

    /// Collect the inputs for the selected menu entry
    fn prompt_command(&self, selection: usize) -> Result<SessionCommand> {
        Ok(match selection {
            0 => SessionCommand::Park(self.prompt_park()?),
            1 => SessionCommand::Unpark {
                ticket: Input::<String>::with_theme(&self.theme)
                    .with_prompt("Ticket id")
                    .interact_text()?,
            },
            2 => self.prompt_reserve()?,
            3 => SessionCommand::Status,
            4 => SessionCommand::Report,
            5 => SessionCommand::Export {
                path: Some(PathBuf::from(
                    Input::<String>::with_theme(&self.theme)
                        .with_prompt("Export to")
                        .default("tickets.csv".to_string())
                        .interact_text()?,
                )),
            },
            _ => SessionCommand::Exit,
        })
    }

    fn prompt_park(&self) -> Result<ParkParams> {
        let kind = Select::with_theme(&self.theme)
            .with_prompt("Vehicle type")
            .items(&VEHICLE_KINDS)
            .default(1)
            .interact()?;

        let plate = Input::<String>::with_theme(&self.theme)
            .with_prompt("Plate")
            .interact_text()?;

        let owner = Input::<String>::with_theme(&self.theme)
            .with_prompt("Owner (optional)")
            .allow_empty(true)
            .interact_text()?;

        let charging = if VEHICLE_KINDS[kind] == "EV" {
            Confirm::with_theme(&self.theme)
                .with_prompt("Needs charging?")
                .default(false)
                .interact()?
        } else {
            false
        };

        Ok(ParkParams {
            kind: VEHICLE_KINDS[kind].to_string(),
            plate,
            owner,
            charging,
        })
    }

    fn prompt_reserve(&self) -> Result<SessionCommand> {
        let plate = Input::<String>::with_theme(&self.theme)
            .with_prompt("Plate")
            .interact_text()?;

        let hours = Input::<u32>::with_theme(&self.theme)
            .with_prompt("Duration (hours)")
            .default(2)
            .interact_text()?;

        let mut choices = vec!["First free VIP slot".to_string()];
        choices.extend(
            self.context
                .ledger
                .slots()
                .iter()
                .filter(|slot| slot.is_vip())
                .map(|slot| slot.id().to_string()),
        );
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Slot")
            .items(&choices)
            .default(0)
            .interact()?;

        Ok(SessionCommand::Reserve {
            plate,
            hours,
            slot: (choice > 0).then(|| choices[choice].clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::Cursor;

    fn context() -> HandlerContext {
        HandlerContext::new(&Config::default(), OutputFormatter::new(true, true)).unwrap()
    }

    #[test]
    fn test_batch_session() {
        let mut ctx = context();
        let script = "\
# morning
park car B1 Budi
park motorcycle M1
reserve VIP-1 2
unpark 1000
status
report
";
        let summary = run_batch(&mut ctx, Cursor::new(script)).unwrap();

        assert_eq!(summary, BatchSummary { executed: 6, failed: 0 });
        assert_eq!(ctx.ledger.tickets().len(), 2);
        assert_eq!(ctx.ledger.payments().len(), 1);
        assert!(ctx.ledger.slot("V1").unwrap().is_reserved());
    }

    #[test]
    fn test_batch_continues_after_errors() {
        let mut ctx = context();
        let script = "unpark 4242\nfly away\npark car B1\n";
        let summary = run_batch(&mut ctx, Cursor::new(script)).unwrap();

        assert_eq!(summary, BatchSummary { executed: 1, failed: 2 });
        assert_eq!(ctx.ledger.tickets().len(), 1);
    }

    #[test]
    fn test_batch_skips_invalid_utf8_lines() {
        let mut ctx = context();
        let mut script = b"park car B1\r\n".to_vec();
        script.extend_from_slice(&[0xff, 0xfe, b'\n']);
        script.extend_from_slice(b"park car B2\n");

        let summary = run_batch(&mut ctx, Cursor::new(script)).unwrap();

        assert_eq!(summary, BatchSummary { executed: 2, failed: 1 });
        assert_eq!(ctx.ledger.tickets().len(), 2);
    }

    #[test]
    fn test_batch_stops_at_exit() {
        let mut ctx = context();
        let script = "park car B1\nexit\npark car B2\n";
        let summary = run_batch(&mut ctx, Cursor::new(script)).unwrap();

        assert_eq!(summary.executed, 2);
        assert_eq!(ctx.ledger.tickets().len(), 1);
    }

    #[test]
    fn test_execute_exit_flow() {
        let mut ctx = context();
        assert_eq!(execute(&mut ctx, SessionCommand::Exit).unwrap(), Flow::Exit);
        assert_eq!(execute(&mut ctx, SessionCommand::Help).unwrap(), Flow::Continue);
    }
}
