use super::Ledger;
use crate::core::{SlotType, VehicleKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Paid tickets per vehicle kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub motorcycles: usize,
    pub cars: usize,
    pub evs: usize,
}

impl KindCounts {
    fn record(&mut self, kind: VehicleKind) {
        match kind {
            VehicleKind::Motorcycle => self.motorcycles += 1,
            VehicleKind::Car => self.cars += 1,
            VehicleKind::Ev { .. } => self.evs += 1,
        }
    }

    pub const fn total(&self) -> usize {
        self.motorcycles + self.cars + self.evs
    }
}

/// Live occupancy of one floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorUtilization {
    pub level: i32,
    pub occupied: usize,
    pub total: usize,
    pub percent: f64,
}

/// Aggregate figures, derived from the ledger on every call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub total_vehicles: usize,
    pub per_kind: KindCounts,
    pub total_revenue: f64,
    pub floors: Vec<FloorUtilization>,
}

/// One row of the occupancy listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub slot_id: String,
    pub kind: SlotType,
    pub level: i32,
    pub occupied: bool,
    pub occupant_plate: Option<String>,
    pub reserved: bool,
    pub reserved_plate: Option<String>,
    pub reservation_expiry: Option<DateTime<Utc>>,
}

impl Ledger {
    /// Revenue, paid vehicles per kind and live utilization per floor
    pub fn daily_report(&self) -> DailyReport {
        let total_revenue: f64 = self.payments.iter().map(|payment| payment.amount).sum();

        let mut per_kind = KindCounts::default();
        for ticket in self.tickets.iter().filter(|ticket| ticket.is_paid()) {
            per_kind.record(ticket.vehicle_kind());
        }

        let mut by_level: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
        for slot in &self.slots {
            let entry = by_level.entry(slot.level()).or_default();
            entry.1 += 1;
            if slot.is_occupied() {
                entry.0 += 1;
            }
        }

        let floors = by_level
            .into_iter()
            .map(|(level, (occupied, total))| FloorUtilization {
                level,
                occupied,
                total,
                percent: if total > 0 {
                    occupied as f64 * 100.0 / total as f64
                } else {
                    0.0
                },
            })
            .collect();

        DailyReport {
            total_vehicles: per_kind.total(),
            per_kind,
            total_revenue,
            floors,
        }
    }

    /// Occupancy listing in registration order
    pub fn status(&self) -> Vec<SlotStatus> {
        self.slots
            .iter()
            .map(|slot| {
                let occupant_plate = slot
                    .occupant()
                    .and_then(|id| self.ticket(id))
                    .map(|ticket| ticket.vehicle().plate().to_string());
                let reservation = slot.reservation();

                SlotStatus {
                    slot_id: slot.id().to_string(),
                    kind: slot.slot_type(),
                    level: slot.level(),
                    occupied: slot.is_occupied(),
                    occupant_plate,
                    reserved: reservation.is_some(),
                    reserved_plate: reservation.map(|r| r.plate.clone()),
                    reservation_expiry: reservation.map(|r| r.expires_at),
                }
            })
            .collect()
    }
}
