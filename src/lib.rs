//! parking-ledger - Parking allocation and billing engine
//!
//! This crate models a multi-level parking facility with:
//! - Regular, EV and VIP slots allocated first-fit in layout order
//! - Time-bounded VIP reservations tied to a plate
//! - Per-kind hourly fees with charging, VIP surcharge and long-stay discount
//! - Tickets, payment records and a derived daily report
//!
//! # Example
//!
//! ```rust
//! use parking_ledger::config::Config;
//! use parking_ledger::core::Vehicle;
//! use parking_ledger::Ledger;
//!
//! let mut ledger = Ledger::from_config(&Config::default())?;
//! let ticket = ledger.park(Vehicle::car("B 1234 XYZ", "Budi")?)?;
//! assert_eq!(ticket.slot_id(), "R1");
//!
//! let fee = ledger.unpark(ticket.id())?;
//! assert_eq!(fee, 5000.0);
//! # Ok::<(), parking_ledger::ParkingError>(())
//! ```
//!
//! # Concurrent Safety
//!
//! [`Ledger`] itself is single-owner. Wrap it in [`ledger::SharedLedger`] to
//! share it between threads; allocation and billing then run under one lock.

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod interactive;
pub mod ledger;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{ParkingError, Result};
pub use ledger::Ledger;
