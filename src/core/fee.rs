//! Fee rules
//!
//! Billing works on whole hours. A stay is billed as
//! `floor(seconds / 3600)` hours, never less than `minimum_hours`.
//! Vehicles in a VIP slot are billed with the VIP formula instead of
//! their own rate.

use super::{SlotType, VehicleKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i64 = 3600;

/// Rate constants, loaded from the `[rates]` configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub motorcycle_per_hour: f64,
    pub car_per_hour: f64,
    pub ev_per_hour: f64,
    /// Flat fee added for EVs that request charging
    pub ev_charging_fee: f64,
    pub charging_enabled: bool,
    /// Surcharge over the car rate for VIP slots
    pub vip_surcharge_percent: f64,
    pub long_stay_discount_percent: f64,
    /// Discount applies when billed hours exceed this
    pub long_stay_threshold_hours: u32,
    pub long_stay_discount_enabled: bool,
    pub minimum_hours: u32,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            motorcycle_per_hour: 2000.0,
            car_per_hour: 5000.0,
            ev_per_hour: 4000.0,
            ev_charging_fee: 3000.0,
            charging_enabled: true,
            vip_surcharge_percent: 50.0,
            long_stay_discount_percent: 10.0,
            long_stay_threshold_hours: 24,
            long_stay_discount_enabled: true,
            minimum_hours: 1,
        }
    }
}

impl RateTable {
    /// Whole hours billed for a stay from `entry` to `exit`
    pub fn billable_hours(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> u32 {
        let seconds = (exit - entry).num_seconds().max(0);
        let hours = u32::try_from(seconds / SECONDS_PER_HOUR).unwrap_or(u32::MAX);
        hours.max(self.minimum_hours)
    }

    /// Fee from the vehicle's own rate rule
    pub fn vehicle_fee(&self, kind: VehicleKind, hours: u32) -> f64 {
        let hours_f = f64::from(hours);
        let amount = match kind {
            VehicleKind::Motorcycle => self.motorcycle_per_hour * hours_f,
            VehicleKind::Car => self.car_per_hour * hours_f,
            VehicleKind::Ev { charging_required } => {
                let base = self.ev_per_hour * hours_f;
                if charging_required && self.charging_enabled {
                    base + self.ev_charging_fee
                } else {
                    base
                }
            },
        };
        self.apply_long_stay_discount(amount, hours)
    }

    /// VIP slot fee; replaces the vehicle rate rather than adding to it
    pub fn vip_fee(&self, hours: u32) -> f64 {
        let base = self.car_per_hour * f64::from(hours);
        let amount = base * (100.0 + self.vip_surcharge_percent) / 100.0;
        self.apply_long_stay_discount(amount, hours)
    }

    /// Fee for a vehicle of `kind` parked `hours` in a slot of `slot_type`
    pub fn fee_for(&self, slot_type: SlotType, kind: VehicleKind, hours: u32) -> f64 {
        match slot_type {
            SlotType::Vip => self.vip_fee(hours),
            SlotType::Regular | SlotType::Ev => self.vehicle_fee(kind, hours),
        }
    }

    /// Fee for a stay between two instants
    pub fn fee_between(
        &self,
        slot_type: SlotType,
        kind: VehicleKind,
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    ) -> f64 {
        self.fee_for(slot_type, kind, self.billable_hours(entry, exit))
    }

    fn apply_long_stay_discount(&self, amount: f64, hours: u32) -> f64 {
        if self.long_stay_discount_enabled && hours > self.long_stay_threshold_hours {
            amount * (100.0 - self.long_stay_discount_percent) / 100.0
        } else {
            amount
        }
    }
}
