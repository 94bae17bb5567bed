//! Ticket export
//!
//! Writes the session's tickets as CSV (one row per ticket), JSON or YAML,
//! either to a file or to stdout.

use super::HandlerContext;
use crate::core::{Ticket, TicketState};
use crate::error::{ParkingError, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    }

    /// Render tickets in this format
    pub fn render(self, tickets: &[Ticket]) -> Result<String> {
        match self {
            Self::Csv => tickets_to_csv(tickets),
            Self::Json => Ok(serde_json::to_string_pretty(tickets)?),
            Self::Yaml => Ok(serde_yaml::to_string(tickets)?),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ParkingError::InvalidInput(format!(
                "Invalid export format: {s}. Must be one of: csv, json, yaml"
            ))),
        }
    }
}

/// Export tickets as CSV
pub fn tickets_to_csv(tickets: &[Ticket]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "ticket_id",
        "slot_id",
        "plate",
        "owner",
        "kind",
        "charging",
        "entry_time",
        "exit_time",
        "fee",
        "state",
    ])?;

    for ticket in tickets {
        let (exit_time, fee, state) = match ticket.state() {
            TicketState::Unpaid => (String::new(), String::new(), "unpaid"),
            TicketState::Paid { fee, exit_time } => {
                (exit_time.to_rfc3339(), format!("{fee:.2}"), "paid")
            },
        };
        let vehicle = ticket.vehicle();

        writer.write_record([
            ticket.id().to_string(),
            ticket.slot_id().to_string(),
            vehicle.plate().to_string(),
            vehicle.owner().to_string(),
            vehicle.kind().label().to_string(),
            vehicle.kind().needs_charging().to_string(),
            ticket.entry_time().to_rfc3339(),
            exit_time,
            fee,
            state.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ParkingError::SerializationError(format!("Failed to finish CSV: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ParkingError::SerializationError(format!("CSV is not UTF-8: {e}")))
}

/// Handler for the export action
///
/// Returns the number of tickets written.
pub fn handle_export(
    ctx: &HandlerContext,
    path: Option<&Path>,
    format: Option<ExportFormat>,
) -> Result<usize> {
    let tickets = ctx.ledger.tickets();
    let format = format
        .or_else(|| path.map(ExportFormat::from_path))
        .unwrap_or_default();
    let content = format.render(tickets)?;

    match path {
        Some(path) => {
            fs::write(path, content)?;
            ctx.success(&format!(
                "Exported {} tickets to {}",
                tickets.len(),
                path.display()
            ));
        },
        None => print!("{content}"),
    }

    Ok(tickets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestLedger, car, ev, t0};
    use chrono::Duration;

    #[test]
    fn test_csv_rows() {
        let mut ledger = TestLedger::default_layout();
        let paid = ledger.park_at(car("B1"), t0()).unwrap();
        ledger.park_at(ev("E-9", true), t0()).unwrap();
        ledger.unpark_at(paid.id(), t0() + Duration::hours(2)).unwrap();

        let csv = tickets_to_csv(ledger.tickets()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ticket_id,slot_id,plate"));
        assert!(lines[1].starts_with("1000,R1,B1,"));
        assert!(lines[1].ends_with(",10000.00,paid"));
        assert!(lines[2].contains(",true,"));
        assert!(lines[2].ends_with(",,,unpaid"));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ExportFormat::from_path(Path::new("out.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out.YML")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_handle_export_to_file() {
        use crate::cli::output::OutputFormatter;
        use crate::config::Config;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tickets.json");

        let mut ctx = HandlerContext::new(&Config::default(), OutputFormatter::new(true, true))
            .unwrap();
        ctx.ledger.park(car("B1")).unwrap();

        let count = handle_export(&ctx, Some(&path), None).unwrap();
        assert_eq!(count, 1);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 1);
    }
}
