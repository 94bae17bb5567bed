//! Handlers for occupancy status and the daily report

use super::HandlerContext;
use crate::error::Result;
use crate::ledger::{DailyReport, SlotStatus};
use colored::Colorize;

/// Handler for the status action
///
/// Lists every slot in registration order with its occupant and reservation.
pub fn handle_status(ctx: &HandlerContext) -> Result<Vec<SlotStatus>> {
    let rows = ctx.ledger.status();

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&rows)?;
        return Ok(rows);
    }

    ctx.formatter.header("Slot status");
    ctx.info(&format!(
        "{:<6} {:<8} {:>5}  {:<20} {}",
        "Slot", "Type", "Level", "Occupant", "Reservation"
    ));
    for row in &rows {
        let occupant = row
            .occupant_plate
            .as_deref()
            .map_or_else(|| "free".green().to_string(), |plate| plate.red().to_string());
        let reservation = match (&row.reserved_plate, row.reservation_expiry) {
            (Some(plate), Some(expiry)) => {
                format!("{plate} until {}", expiry.format("%Y-%m-%d %H:%M"))
            },
            _ => "-".to_string(),
        };
        ctx.info(&format!(
            "{:<6} {:<8} {:>5}  {:<20} {}",
            row.slot_id,
            row.kind.to_string(),
            row.level,
            occupant,
            reservation
        ));
    }

    let occupied = rows.iter().filter(|row| row.occupied).count();
    ctx.info(&format!("\n{occupied}/{} slots occupied", rows.len()));

    Ok(rows)
}

/// Handler for the daily report action
pub fn handle_report(ctx: &HandlerContext) -> Result<DailyReport> {
    let report = ctx.ledger.daily_report();

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&report)?;
        return Ok(report);
    }

    ctx.formatter.header("Daily report");
    ctx.info(&format!("Vehicles served: {}", report.total_vehicles));
    ctx.info(&format!("  Motorcycles: {}", report.per_kind.motorcycles));
    ctx.info(&format!("  Cars:        {}", report.per_kind.cars));
    ctx.info(&format!("  EVs:         {}", report.per_kind.evs));
    ctx.info(&format!(
        "Total revenue: {}",
        ctx.amount(report.total_revenue).bold()
    ));

    ctx.info("Floor utilization:");
    for floor in &report.floors {
        ctx.info(&format!(
            "  Level {:>2}: {}/{} ({:.1}%)",
            floor.level, floor.occupied, floor.total, floor.percent
        ));
    }

    Ok(report)
}
