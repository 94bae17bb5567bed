//! Handler for VIP reservations

use super::HandlerContext;
use super::validation::validate_plate;
use crate::error::Result;
use serde_json::json;

/// Handler for the reserve action
///
/// Reserves `slot` when given, otherwise the first free VIP slot.
pub fn handle_reserve(
    ctx: &mut HandlerContext,
    plate: &str,
    hours: u32,
    slot: Option<&str>,
) -> Result<String> {
    validate_plate(plate)?;

    let slot_id = match slot {
        Some(slot_id) => ctx.ledger.reserve_vip_slot(slot_id, plate, hours)?,
        None => ctx.ledger.reserve_vip(plate, hours)?,
    };

    let expires_at = ctx
        .ledger
        .slot(&slot_id)
        .and_then(|slot| slot.reservation())
        .map(|reservation| reservation.expires_at);

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&json!({
            "status": "reserved",
            "slot_id": slot_id,
            "plate": plate.trim(),
            "expires_at": expires_at,
        }))?;
    } else {
        ctx.success(&format!(
            "VIP slot {slot_id} reserved for '{}' ({hours}h)",
            plate.trim()
        ));
        if let Some(expires_at) = expires_at {
            ctx.info(&format!(
                "  Expires: {}",
                expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
    }

    Ok(slot_id)
}
