use super::{Vehicle, VehicleKind};
use crate::error::{ParkingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential ticket number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u32);

impl TicketId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// The id issued after this one; `None` once the sequence is exhausted
    pub(crate) const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .trim_start_matches('#')
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ParkingError::InvalidInput(format!("Invalid ticket id: {s}")))
    }
}

/// Payment state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TicketState {
    Unpaid,
    Paid { fee: f64, exit_time: DateTime<Utc> },
}

/// Record of one park/unpark episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    slot_id: String,
    vehicle: Vehicle,
    entry_time: DateTime<Utc>,
    state: TicketState,
}

impl Ticket {
    pub(crate) fn issue(
        id: TicketId,
        slot_id: impl Into<String>,
        vehicle: Vehicle,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slot_id: slot_id.into(),
            vehicle,
            entry_time,
            state: TicketState::Unpaid,
        }
    }

    pub const fn id(&self) -> TicketId {
        self.id
    }

    pub fn slot_id(&self) -> &str {
        &self.slot_id
    }

    pub const fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub const fn vehicle_kind(&self) -> VehicleKind {
        self.vehicle.kind()
    }

    pub const fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    pub const fn state(&self) -> TicketState {
        self.state
    }

    pub const fn is_paid(&self) -> bool {
        matches!(self.state, TicketState::Paid { .. })
    }

    /// Fee charged, once paid
    pub const fn fee(&self) -> Option<f64> {
        match self.state {
            TicketState::Paid { fee, .. } => Some(fee),
            TicketState::Unpaid => None,
        }
    }

    pub const fn exit_time(&self) -> Option<DateTime<Utc>> {
        match self.state {
            TicketState::Paid { exit_time, .. } => Some(exit_time),
            TicketState::Unpaid => None,
        }
    }

    /// Transition Unpaid -> Paid; a paid ticket is never reopened or repriced
    pub(crate) fn settle(&mut self, fee: f64, exit_time: DateTime<Utc>) -> Result<()> {
        if self.is_paid() {
            return Err(ParkingError::InvalidTicket { id: self.id.value() });
        }
        self.state = TicketState::Paid { fee, exit_time };
        Ok(())
    }
}

/// Revenue entry appended on every successful unpark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub ticket_id: TicketId,
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ticket() -> Ticket {
        let entry = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Ticket::issue(
            TicketId::new(1000),
            "R1",
            Vehicle::car("B1234", "Budi").unwrap(),
            entry,
        )
    }

    #[test]
    fn test_ticket_starts_unpaid() {
        let ticket = ticket();
        assert!(!ticket.is_paid());
        assert_eq!(ticket.fee(), None);
        assert_eq!(ticket.slot_id(), "R1");
    }

    #[test]
    fn test_settle_is_one_way() {
        let mut ticket = ticket();
        let exit = ticket.entry_time() + Duration::hours(2);

        ticket.settle(10_000.0, exit).unwrap();
        assert_eq!(ticket.fee(), Some(10_000.0));
        assert_eq!(ticket.exit_time(), Some(exit));

        let err = ticket.settle(1.0, exit).unwrap_err();
        assert!(matches!(err, ParkingError::InvalidTicket { id: 1000 }));
        assert_eq!(ticket.fee(), Some(10_000.0));
    }

    #[test]
    fn test_ticket_id_parsing() {
        assert_eq!("1001".parse::<TicketId>().unwrap(), TicketId::new(1001));
        assert_eq!(" #1002 ".parse::<TicketId>().unwrap(), TicketId::new(1002));
        assert!("abc".parse::<TicketId>().is_err());
        assert_eq!(TicketId::new(1000).next(), Some(TicketId::new(1001)));
        assert_eq!(TicketId::new(u32::MAX).next(), None);
    }
}
