//! Handlers for vehicles entering and leaving

use super::HandlerContext;
use super::validation::{parse_ticket_id, parse_vehicle_kind, validate_plate};
use crate::core::{Ticket, VehicleBuilder};
use crate::error::Result;
use serde_json::json;

/// Input collected for a park request
#[derive(Debug, Clone)]
pub struct ParkParams {
    pub kind: String,
    pub plate: String,
    pub owner: String,
    pub charging: bool,
}

/// Handler for the park action
///
/// Builds the vehicle, allocates a slot and prints the issued ticket.
pub fn handle_park(ctx: &mut HandlerContext, params: ParkParams) -> Result<Ticket> {
    validate_plate(&params.plate)?;
    let kind = parse_vehicle_kind(&params.kind, params.charging)?;

    let vehicle = VehicleBuilder::new()
        .plate(params.plate)
        .owner(params.owner)
        .kind(kind)
        .build()?;

    let ticket = ctx.ledger.park(vehicle)?;

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&json!({
            "status": "parked",
            "ticket_id": ticket.id(),
            "slot_id": ticket.slot_id(),
            "plate": ticket.vehicle().plate(),
            "entry_time": ticket.entry_time(),
        }))?;
    } else {
        ctx.success(&format!(
            "Ticket {} issued: {} '{}' parked in slot {}",
            ticket.id(),
            ticket.vehicle_kind(),
            ticket.vehicle().plate(),
            ticket.slot_id()
        ));
        ctx.info(&format!(
            "  Entry: {}",
            ticket.entry_time().format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    Ok(ticket)
}

/// Handler for the unpark action
///
/// Settles the ticket, frees its slot and prints the fee charged.
pub fn handle_unpark(ctx: &mut HandlerContext, ticket: &str) -> Result<f64> {
    let ticket_id = parse_ticket_id(ticket)?;
    let fee = ctx.ledger.unpark(ticket_id)?;

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&json!({
            "status": "paid",
            "ticket_id": ticket_id,
            "fee": fee,
            "currency": ctx.currency,
        }))?;
    } else {
        ctx.success(&format!("Ticket {ticket_id} paid: {}", ctx.amount(fee)));
    }

    Ok(fee)
}
