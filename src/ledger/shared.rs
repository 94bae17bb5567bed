use super::{DailyReport, Ledger, SlotStatus};
use crate::core::{Ticket, TicketId, Vehicle};
use crate::error::{ParkingError, Result};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

/// A ledger shared between threads
///
/// One lock guards the whole ledger, so allocation, billing and the ticket
/// sequence advance atomically with respect to each other.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Ledger>> {
        self.inner.lock().map_err(|_| ParkingError::LockPoisoned)
    }

    pub fn park(&self, vehicle: Vehicle) -> Result<Ticket> {
        self.lock()?.park(vehicle)
    }

    pub fn park_at(&self, vehicle: Vehicle, now: DateTime<Utc>) -> Result<Ticket> {
        self.lock()?.park_at(vehicle, now)
    }

    pub fn unpark(&self, ticket_id: TicketId) -> Result<f64> {
        self.lock()?.unpark(ticket_id)
    }

    pub fn unpark_at(&self, ticket_id: TicketId, now: DateTime<Utc>) -> Result<f64> {
        self.lock()?.unpark_at(ticket_id, now)
    }

    pub fn reserve_vip(&self, plate: &str, duration_hours: u32) -> Result<String> {
        self.lock()?.reserve_vip(plate, duration_hours)
    }

    pub fn status(&self) -> Result<Vec<SlotStatus>> {
        Ok(self.lock()?.status())
    }

    pub fn daily_report(&self) -> Result<DailyReport> {
        Ok(self.lock()?.daily_report())
    }

    /// Run `f` with exclusive access to the ledger
    pub fn with<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> Result<T> {
        Ok(f(&mut *self.lock()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SlotType;
    use crate::test_utils::{TestLedger, car, t0};
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_concurrent_parks_never_double_book() {
        let shared = SharedLedger::new(TestLedger::small(&[
            ("R1", SlotType::Regular, 1),
            ("R2", SlotType::Regular, 1),
            ("R3", SlotType::Regular, 1),
        ]));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || shared.park_at(car(&format!("B{i}")), t0()))
            })
            .collect();

        let tickets: Vec<Ticket> = handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap().ok())
            .collect();

        assert_eq!(tickets.len(), 3);
        let slots: HashSet<_> = tickets.iter().map(|t| t.slot_id().to_string()).collect();
        assert_eq!(slots.len(), 3);
        let ids: HashSet<_> = tickets.iter().map(Ticket::id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_shared_round_trip() {
        let shared = SharedLedger::new(TestLedger::default_layout());
        let ticket = shared.park_at(car("B1"), t0()).unwrap();
        let fee = shared
            .unpark_at(ticket.id(), t0() + chrono::Duration::hours(2))
            .unwrap();

        assert_eq!(fee, 10_000.0);
        assert_eq!(shared.daily_report().unwrap().total_revenue, 10_000.0);
        assert_eq!(shared.with(|ledger| ledger.payments().len()).unwrap(), 1);
    }
}
