//! The parking ledger
//!
//! [`Ledger`] owns the slot collection, the ticket history and the payment
//! records, and is the only place where any of them change. Every
//! operation either completes fully or leaves the ledger untouched.
//!
//! Each operation has an `_at` form that takes the current time
//! explicitly; the plain form reads the wall clock.

mod report;
mod shared;

pub use report::{DailyReport, FloorUtilization, KindCounts, SlotStatus};
pub use shared::SharedLedger;

use crate::config::{Config, ReservationConfig, SlotDefinition};
use crate::core::{PaymentRecord, RateTable, Slot, SlotType, Ticket, TicketId, Vehicle};
use crate::error::{ParkingError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Allocation and billing engine for one parking facility
#[derive(Debug, Clone)]
pub struct Ledger {
    slots: Vec<Slot>,
    tickets: Vec<Ticket>,
    payments: Vec<PaymentRecord>,
    /// `None` once every id has been issued
    next_ticket_id: Option<TicketId>,
    rates: RateTable,
    reservation: ReservationConfig,
}

impl Ledger {
    /// Build a ledger from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let slots = config.layout.active_slots().cloned().collect::<Vec<_>>();
        Self::with_layout(
            &slots,
            config.rates.clone(),
            config.reservation.clone(),
            config.system.initial_ticket_id,
        )
    }

    /// Build a ledger from an explicit layout
    ///
    /// Slot ids must be unique and non-empty, and at least one slot is
    /// required.
    pub fn with_layout(
        layout: &[SlotDefinition],
        rates: RateTable,
        reservation: ReservationConfig,
        initial_ticket_id: u32,
    ) -> Result<Self> {
        if layout.is_empty() {
            return Err(ParkingError::EmptyLayout);
        }

        let mut seen = HashSet::new();
        let mut slots = Vec::with_capacity(layout.len());
        for definition in layout {
            let id = definition.id.trim();
            if id.is_empty() {
                return Err(ParkingError::ConfigError(
                    "Slot id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(id.to_string()) {
                return Err(ParkingError::DuplicateSlot { id: id.to_string() });
            }
            slots.push(Slot::new(id, definition.level, definition.kind));
        }

        info!("Ledger initialized with {} slots", slots.len());

        Ok(Self {
            slots,
            tickets: Vec::new(),
            payments: Vec::new(),
            next_ticket_id: Some(TicketId::new(initial_ticket_id)),
            rates,
            reservation,
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id() == id)
    }

    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id() == id)
    }

    /// Tickets that have not been paid yet
    pub fn open_tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|ticket| !ticket.is_paid())
    }

    /// Park a vehicle now
    pub fn park(&mut self, vehicle: Vehicle) -> Result<Ticket> {
        self.park_at(vehicle, Utc::now())
    }

    /// Park a vehicle in the first unoccupied slot that accepts it
    pub fn park_at(&mut self, mut vehicle: Vehicle, now: DateTime<Utc>) -> Result<Ticket> {
        let Some(ticket_id) = self.next_ticket_id else {
            warn!("Ticket ids exhausted; rejecting '{}'", vehicle.plate());
            return Err(ParkingError::TicketIdsExhausted);
        };

        let Some(index) = self.find_available_slot(&vehicle, now) else {
            warn!(
                "No available slot for {} '{}'",
                vehicle.kind(),
                vehicle.plate()
            );
            return Err(ParkingError::NoAvailableSlot {
                plate: vehicle.plate().to_string(),
                kind: vehicle.kind().to_string(),
            });
        };

        self.slots[index].occupy(ticket_id)?;
        self.next_ticket_id = ticket_id.next();

        vehicle.mark_arrived(now);
        let ticket = Ticket::issue(ticket_id, self.slots[index].id(), vehicle, now);
        self.tickets.push(ticket.clone());

        info!(
            "Parked {} '{}' in slot {} (ticket {})",
            ticket.vehicle_kind(),
            ticket.vehicle().plate(),
            ticket.slot_id(),
            ticket_id
        );
        Ok(ticket)
    }

    /// Unpark now and return the fee charged
    pub fn unpark(&mut self, ticket_id: TicketId) -> Result<f64> {
        self.unpark_at(ticket_id, Utc::now())
    }

    /// Settle an unpaid ticket, release its slot and record the payment
    pub fn unpark_at(&mut self, ticket_id: TicketId, now: DateTime<Utc>) -> Result<f64> {
        let Some(ticket_index) = self
            .tickets
            .iter()
            .position(|ticket| ticket.id() == ticket_id && !ticket.is_paid())
        else {
            warn!("Rejected unpark for invalid ticket {ticket_id}");
            return Err(ParkingError::InvalidTicket {
                id: ticket_id.value(),
            });
        };

        let ticket = &self.tickets[ticket_index];
        let slot_index = self
            .slots
            .iter()
            .position(|slot| slot.id() == ticket.slot_id())
            .ok_or_else(|| ParkingError::SlotNotFound {
                id: ticket.slot_id().to_string(),
            })?;

        let slot_type = self.slots[slot_index].slot_type();
        let hours = self.rates.billable_hours(ticket.entry_time(), now);
        let fee = self.rates.fee_for(slot_type, ticket.vehicle_kind(), hours);

        self.tickets[ticket_index].settle(fee, now)?;

        let slot = &mut self.slots[slot_index];
        slot.release();
        if let Some(reservation) = slot.clear_reservation() {
            debug!(
                "Cleared reservation on {} held by '{}'",
                slot.id(),
                reservation.plate
            );
        }

        self.payments.push(PaymentRecord {
            ticket_id,
            timestamp: now,
            amount: fee,
        });

        info!(
            "Unparked ticket {ticket_id} from slot {} after {hours}h, fee {fee:.2}",
            slot.id()
        );
        Ok(fee)
    }

    /// Reserve the first free VIP slot for `plate`, starting now
    pub fn reserve_vip(&mut self, plate: &str, duration_hours: u32) -> Result<String> {
        self.reserve_vip_at(plate, duration_hours, Utc::now())
    }

    /// Reserve the first VIP slot that is unoccupied and not flagged as reserved
    pub fn reserve_vip_at(
        &mut self,
        plate: &str,
        duration_hours: u32,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let plate = Self::validate_reservation(plate, duration_hours, &self.reservation)?;

        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_vip() && !slot.is_occupied() && !slot.is_reserved())
        else {
            warn!("No VIP slot free to reserve for '{plate}'");
            return Err(ParkingError::reservation_failed(
                "no unoccupied, unreserved VIP slot",
            ));
        };

        let expires_at = Self::reservation_expiry(now, duration_hours)?;
        slot.reserve(plate, expires_at)?;

        info!(
            "VIP slot {} reserved for '{plate}' until {expires_at}",
            slot.id()
        );
        Ok(slot.id().to_string())
    }

    /// Reserve a specific VIP slot, starting now
    pub fn reserve_vip_slot(
        &mut self,
        slot_id: &str,
        plate: &str,
        duration_hours: u32,
    ) -> Result<String> {
        self.reserve_vip_slot_at(slot_id, plate, duration_hours, Utc::now())
    }

    /// Reserve the named VIP slot; fails if it is occupied, reserved or not VIP
    pub fn reserve_vip_slot_at(
        &mut self,
        slot_id: &str,
        plate: &str,
        duration_hours: u32,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let plate = Self::validate_reservation(plate, duration_hours, &self.reservation)?;

        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.id() == slot_id)
            .ok_or_else(|| ParkingError::SlotNotFound {
                id: slot_id.to_string(),
            })?;

        let expires_at = Self::reservation_expiry(now, duration_hours)?;
        if let Err(err) = slot.reserve(plate, expires_at) {
            warn!("Reservation of {slot_id} for '{plate}' rejected: {err}");
            return Err(err);
        }

        info!("VIP slot {slot_id} reserved for '{plate}' until {expires_at}");
        Ok(slot_id.to_string())
    }

    /// Fee the current rate table would charge; touches no state
    pub fn quote(&self, slot_type: SlotType, vehicle: &Vehicle, hours: u32) -> f64 {
        self.rates
            .fee_for(slot_type, vehicle.kind(), hours.max(self.rates.minimum_hours))
    }

    fn find_available_slot(&self, vehicle: &Vehicle, now: DateTime<Utc>) -> Option<usize> {
        let found = self
            .slots
            .iter()
            .position(|slot| slot.is_available_for(vehicle, now));
        debug!(
            "Allocation scan for '{}' ({}): {:?}",
            vehicle.plate(),
            vehicle.kind(),
            found.map(|index| self.slots[index].id())
        );
        found
    }

    fn reservation_expiry(now: DateTime<Utc>, duration_hours: u32) -> Result<DateTime<Utc>> {
        Duration::try_hours(i64::from(duration_hours))
            .and_then(|duration| now.checked_add_signed(duration))
            .ok_or_else(|| {
                ParkingError::reservation_failed(format!(
                    "a {duration_hours}h reservation ends outside the supported date range"
                ))
            })
    }

    fn validate_reservation<'a>(
        plate: &'a str,
        duration_hours: u32,
        limits: &ReservationConfig,
    ) -> Result<&'a str> {
        let plate = plate.trim();
        if plate.is_empty() {
            return Err(ParkingError::InvalidInput(
                "Reservation plate cannot be empty".to_string(),
            ));
        }
        limits.check_duration(duration_hours)?;
        Ok(plate)
    }
}
