//! Base handler utilities for common operations
//!
//! This module provides the state shared by the session handlers and the
//! parsing helpers used to turn operator input into domain values.

use crate::cli::output::{OutputFormatter, format_amount};
use crate::config::Config;
use crate::error::Result;
use crate::ledger::Ledger;

/// Context for handler operations
///
/// Owns the ledger for the lifetime of one session together with the
/// formatter and the currency label used when printing amounts.
pub struct HandlerContext {
    pub ledger: Ledger,
    pub formatter: OutputFormatter,
    pub currency: String,
}

impl HandlerContext {
    /// Create a new handler context from the effective configuration
    pub fn new(config: &Config, formatter: OutputFormatter) -> Result<Self> {
        Ok(Self {
            ledger: Ledger::from_config(config)?,
            formatter,
            currency: config.system.currency.clone(),
        })
    }

    /// Format an amount in the configured currency
    pub fn amount(&self, value: f64) -> String {
        format_amount(&self.currency, value)
    }

    /// Display formatted success message
    pub fn success(&self, message: &str) {
        self.formatter.success(message);
    }

    /// Display formatted error message
    pub fn error(&self, message: &str) {
        self.formatter.error(message);
    }

    /// Display formatted info message
    pub fn info(&self, message: &str) {
        self.formatter.info(message);
    }

    /// Display formatted warning message
    pub fn warning(&self, message: &str) {
        self.formatter.warning(message);
    }
}

/// Common validation functions
pub mod validation {
    use crate::core::{TicketId, VehicleKind};
    use crate::error::{ParkingError, Result};

    /// Parse a vehicle kind, attaching the charging request to EVs
    pub fn parse_vehicle_kind(kind: &str, charging: bool) -> Result<VehicleKind> {
        match kind.parse::<VehicleKind>()? {
            VehicleKind::Ev { .. } => Ok(VehicleKind::Ev {
                charging_required: charging,
            }),
            _ if charging => Err(ParkingError::InvalidInput(format!(
                "Charging can only be requested for EVs, not '{kind}'"
            ))),
            other => Ok(other),
        }
    }

    /// Parse a whole number of hours
    pub fn parse_hours(hours: &str) -> Result<u32> {
        hours.trim().parse::<u32>().map_err(|_| {
            ParkingError::InvalidInput(format!(
                "Invalid duration: {hours}. Must be a whole number of hours"
            ))
        })
    }

    /// Parse a ticket id such as `1000` or `#1000`
    pub fn parse_ticket_id(ticket: &str) -> Result<TicketId> {
        ticket.parse()
    }

    /// Validate a plate before it reaches the ledger
    pub fn validate_plate(plate: &str) -> Result<()> {
        if plate.trim().is_empty() {
            return Err(ParkingError::InvalidInput(
                "Plate cannot be empty".to_string(),
            ));
        }
        if plate.trim().chars().count() > 20 {
            return Err(ParkingError::InvalidInput(
                "Plate cannot exceed 20 characters".to_string(),
            ));
        }
        Ok(())
    }
}
