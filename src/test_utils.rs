//! Test utilities for parking-ledger
//!
//! Common fixtures shared by the unit tests across the crate.

#![cfg(test)]

use crate::config::{Config, ReservationConfig, SlotDefinition};
use crate::core::{RateTable, SlotType, Vehicle};
use crate::ledger::Ledger;
use chrono::{DateTime, TimeZone, Utc};

/// Ledger fixtures
pub struct TestLedger;

impl TestLedger {
    /// Ledger with the default ten-slot layout
    pub fn default_layout() -> Ledger {
        Ledger::from_config(&Config::default()).expect("Failed to build default ledger")
    }

    /// Ledger with a hand-written layout and default rates
    pub fn small(slots: &[(&str, SlotType, i32)]) -> Ledger {
        let layout: Vec<SlotDefinition> = slots
            .iter()
            .map(|(id, kind, level)| SlotDefinition::new(*id, *kind, *level))
            .collect();
        Ledger::with_layout(
            &layout,
            RateTable::default(),
            ReservationConfig::default(),
            1000,
        )
        .expect("Failed to build test ledger")
    }
}

/// Fixed reference instant used as "now" in tests
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn car(plate: &str) -> Vehicle {
    Vehicle::car(plate, "Test Owner").expect("Invalid test plate")
}

pub fn motorcycle(plate: &str) -> Vehicle {
    Vehicle::motorcycle(plate, "Test Owner").expect("Invalid test plate")
}

pub fn ev(plate: &str, charging_required: bool) -> Vehicle {
    Vehicle::ev(plate, "Test Owner", charging_required).expect("Invalid test plate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_fixture() {
        let ledger = TestLedger::default_layout();
        assert_eq!(ledger.slots().len(), 10);
        assert_eq!(ledger.slots()[0].id(), "R1");
    }

    #[test]
    fn test_small_fixture_keeps_order() {
        let ledger = TestLedger::small(&[("V1", SlotType::Vip, 2), ("R1", SlotType::Regular, 1)]);
        let ids: Vec<&str> = ledger.slots().iter().map(|slot| slot.id()).collect();
        assert_eq!(ids, vec!["V1", "R1"]);
    }
}
