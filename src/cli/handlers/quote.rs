//! Fee quotes and layout listing
//!
//! Both read the configuration only and never touch a ledger.

use super::validation::parse_vehicle_kind;
use crate::cli::output::{OutputFormatter, format_amount};
use crate::config::Config;
use crate::core::SlotType;
use crate::error::Result;
use serde_json::json;

/// Input for a fee quote
#[derive(Debug, Clone)]
pub struct QuoteParams {
    pub kind: String,
    pub charging: bool,
    pub hours: u32,
    pub vip: bool,
}

/// Handler for the `quote` command
///
/// Prints the fee the configured rate table charges for the stay.
pub fn handle_quote(
    config: &Config,
    params: &QuoteParams,
    formatter: &OutputFormatter,
) -> Result<f64> {
    let kind = parse_vehicle_kind(&params.kind, params.charging)?;
    let slot_type = if params.vip {
        SlotType::Vip
    } else {
        SlotType::Regular
    };
    let rates = &config.rates;
    let hours = params.hours.max(rates.minimum_hours);
    let fee = rates.fee_for(slot_type, kind, hours);

    if formatter.is_json() {
        formatter.print_json(&json!({
            "kind": kind,
            "slot_type": slot_type,
            "hours": hours,
            "fee": fee,
            "currency": config.system.currency,
        }))?;
    } else {
        formatter.info(&format!(
            "{kind} for {hours}h in a {slot_type} slot: {}",
            format_amount(&config.system.currency, fee)
        ));
        if hours > params.hours {
            formatter.info(&format!("  (minimum stay of {hours}h applied)"));
        }
    }

    Ok(fee)
}

/// Handler for the `layout` command
pub fn handle_layout(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let slots: Vec<_> = config.layout.active_slots().collect();

    if formatter.is_json() {
        return formatter.print_json(&slots);
    }

    formatter.header("Parking layout");
    for slot in &slots {
        formatter.info(&format!(
            "  {:<6} {:<8} level {}",
            slot.id,
            slot.kind.to_string(),
            slot.level
        ));
    }
    let inactive = config.layout.slots.len() - slots.len();
    if inactive > 0 {
        formatter.info(&format!("  ({inactive} inactive slots hidden)"));
    }
    formatter.info(&format!("{} active slots", slots.len()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(kind: &str, charging: bool, hours: u32, vip: bool) -> Result<f64> {
        handle_quote(
            &Config::default(),
            &QuoteParams {
                kind: kind.to_string(),
                charging,
                hours,
                vip,
            },
            &OutputFormatter::new(true, true),
        )
    }

    #[test]
    fn test_quote_vehicle_rates() {
        assert_eq!(quote("car", false, 3, false).unwrap(), 15_000.0);
        assert_eq!(quote("motorcycle", false, 2, false).unwrap(), 4_000.0);
        assert_eq!(quote("ev", true, 2, false).unwrap(), 11_000.0);
    }

    #[test]
    fn test_quote_vip_replaces_vehicle_rate() {
        assert_eq!(quote("car", false, 3, true).unwrap(), 22_500.0);
        assert_eq!(quote("motorcycle", false, 3, true).unwrap(), 22_500.0);
    }

    #[test]
    fn test_quote_minimum_hours() {
        assert_eq!(quote("car", false, 0, false).unwrap(), 5_000.0);
    }

    #[test]
    fn test_quote_rejects_charging_for_car() {
        assert!(quote("car", true, 1, false).is_err());
    }

    #[test]
    fn test_layout_handler() {
        assert!(handle_layout(&Config::default(), &OutputFormatter::new(false, true)).is_ok());
    }
}
