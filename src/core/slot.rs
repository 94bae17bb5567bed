use super::{TicketId, Vehicle};
use crate::error::{ParkingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slot category as it appears in the layout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    Regular,
    Ev,
    Vip,
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "Regular"),
            Self::Ev => write!(f, "EV"),
            Self::Vip => write!(f, "VIP"),
        }
    }
}

impl FromStr for SlotType {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "ev" => Ok(Self::Ev),
            "vip" => Ok(Self::Vip),
            _ => Err(ParkingError::InvalidInput(format!(
                "Invalid slot type: {s}. Must be one of: regular, ev, vip"
            ))),
        }
    }
}

/// Time-bounded claim on a VIP slot for one plate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub plate: String,
    pub expires_at: DateTime<Utc>,
}

impl Reservation {
    /// A reservation stops excluding other vehicles once `now >= expires_at`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Whether this reservation admits the given plate at `now`
    pub fn admits(&self, plate: &str, now: DateTime<Utc>) -> bool {
        self.plate == plate && self.is_active(now)
    }
}

/// Per-kind slot state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    Regular,
    Ev,
    Vip { reservation: Option<Reservation> },
}

/// A physical parking space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    id: String,
    level: i32,
    kind: SlotKind,
    occupant: Option<TicketId>,
}

impl Slot {
    /// Create an empty slot of the given type
    pub fn new(id: impl Into<String>, level: i32, slot_type: SlotType) -> Self {
        let kind = match slot_type {
            SlotType::Regular => SlotKind::Regular,
            SlotType::Ev => SlotKind::Ev,
            SlotType::Vip => SlotKind::Vip { reservation: None },
        };

        Self {
            id: id.into(),
            level,
            kind,
            occupant: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn level(&self) -> i32 {
        self.level
    }

    pub const fn kind(&self) -> &SlotKind {
        &self.kind
    }

    pub const fn slot_type(&self) -> SlotType {
        match self.kind {
            SlotKind::Regular => SlotType::Regular,
            SlotKind::Ev => SlotType::Ev,
            SlotKind::Vip { .. } => SlotType::Vip,
        }
    }

    pub const fn is_vip(&self) -> bool {
        matches!(self.kind, SlotKind::Vip { .. })
    }

    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Ticket of the vehicle currently parked here
    pub const fn occupant(&self) -> Option<TicketId> {
        self.occupant
    }

    /// Current reservation, including one that has already expired
    pub const fn reservation(&self) -> Option<&Reservation> {
        match &self.kind {
            SlotKind::Vip { reservation } => reservation.as_ref(),
            _ => None,
        }
    }

    /// The reservation flag; does not look at expiry
    pub const fn is_reserved(&self) -> bool {
        self.reservation().is_some()
    }

    /// Eligibility rule for this slot, ignoring occupancy
    pub fn accepts(&self, vehicle: &Vehicle, now: DateTime<Utc>) -> bool {
        match &self.kind {
            SlotKind::Regular => true,
            SlotKind::Ev => vehicle.kind().is_ev(),
            SlotKind::Vip { reservation: None } => true,
            SlotKind::Vip {
                reservation: Some(reservation),
            } => {
                // Expired reservations no longer exclude anyone
                !reservation.is_active(now) || reservation.admits(vehicle.plate(), now)
            },
        }
    }

    /// Unoccupied and eligible
    pub fn is_available_for(&self, vehicle: &Vehicle, now: DateTime<Utc>) -> bool {
        !self.is_occupied() && self.accepts(vehicle, now)
    }

    pub(crate) fn occupy(&mut self, ticket: TicketId) -> Result<()> {
        if let Some(current) = self.occupant {
            return Err(ParkingError::custom(format!(
                "Slot {} is already occupied by ticket {current}",
                self.id
            )));
        }
        self.occupant = Some(ticket);
        Ok(())
    }

    pub(crate) fn release(&mut self) -> Option<TicketId> {
        self.occupant.take()
    }

    /// Place a reservation; the slot is left untouched on failure
    pub(crate) fn reserve(&mut self, plate: &str, expires_at: DateTime<Utc>) -> Result<()> {
        if self.is_occupied() {
            return Err(ParkingError::reservation_failed(format!(
                "slot {} is occupied",
                self.id
            )));
        }

        match &mut self.kind {
            SlotKind::Vip { reservation: Some(existing) } => {
                Err(ParkingError::reservation_failed(format!(
                    "slot {} is already reserved for {}",
                    self.id, existing.plate
                )))
            },
            SlotKind::Vip { reservation } => {
                *reservation = Some(Reservation {
                    plate: plate.to_string(),
                    expires_at,
                });
                Ok(())
            },
            SlotKind::Regular | SlotKind::Ev => Err(ParkingError::reservation_failed(format!(
                "slot {} is not a VIP slot",
                self.id
            ))),
        }
    }

    pub(crate) fn clear_reservation(&mut self) -> Option<Reservation> {
        match &mut self.kind {
            SlotKind::Vip { reservation } => reservation.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn vehicles() -> [Vehicle; 3] {
        [
            Vehicle::motorcycle("M1", "a").unwrap(),
            Vehicle::car("C1", "b").unwrap(),
            Vehicle::ev("E1", "c", true).unwrap(),
        ]
    }

    #[test]
    fn test_regular_accepts_everything() {
        let slot = Slot::new("R1", 1, SlotType::Regular);
        for v in &vehicles() {
            assert!(slot.accepts(v, t0()));
        }
    }

    #[test]
    fn test_ev_slot_accepts_only_ev() {
        let slot = Slot::new("E1", 1, SlotType::Ev);
        let [bike, car, ev] = vehicles();
        assert!(!slot.accepts(&bike, t0()));
        assert!(!slot.accepts(&car, t0()));
        assert!(slot.accepts(&ev, t0()));
    }

    #[test]
    fn test_unreserved_vip_accepts_everything() {
        let slot = Slot::new("V1", 2, SlotType::Vip);
        for v in &vehicles() {
            assert!(slot.accepts(v, t0()));
        }
    }

    #[test]
    fn test_reserved_vip_admits_only_holder_before_expiry() {
        let mut slot = Slot::new("V1", 2, SlotType::Vip);
        slot.reserve("C1", t0() + Duration::hours(2)).unwrap();

        let [bike, car, _] = vehicles();
        assert!(slot.accepts(&car, t0()));
        assert!(!slot.accepts(&bike, t0()));
        assert!(!slot.accepts(&bike, t0() + Duration::minutes(119)));
    }

    #[test]
    fn test_expired_reservation_behaves_as_unreserved() {
        let mut slot = Slot::new("V1", 2, SlotType::Vip);
        let expiry = t0() + Duration::hours(2);
        slot.reserve("C1", expiry).unwrap();

        let [bike, car, _] = vehicles();
        assert!(slot.accepts(&bike, expiry));
        // The holder is also treated like anyone else once expired
        assert!(slot.accepts(&car, expiry + Duration::hours(1)));
        // The flag stays until cleared explicitly
        assert!(slot.is_reserved());
    }

    #[test]
    fn test_reserve_rejects_occupied_slot_without_mutation() {
        let mut slot = Slot::new("V1", 2, SlotType::Vip);
        slot.occupy(TicketId::new(1000)).unwrap();

        let err = slot.reserve("C1", t0()).unwrap_err();
        assert!(matches!(err, ParkingError::ReservationFailed { .. }));
        assert!(slot.reservation().is_none());
    }

    #[test]
    fn test_reserve_rejects_non_vip_and_double_reservation() {
        let mut regular = Slot::new("R1", 1, SlotType::Regular);
        assert!(regular.reserve("C1", t0()).is_err());

        let mut vip = Slot::new("V1", 2, SlotType::Vip);
        vip.reserve("C1", t0() + Duration::hours(1)).unwrap();
        assert!(vip.reserve("C2", t0() + Duration::hours(1)).is_err());
        assert_eq!(vip.reservation().unwrap().plate, "C1");
    }

    #[test]
    fn test_occupy_twice_fails() {
        let mut slot = Slot::new("R1", 1, SlotType::Regular);
        slot.occupy(TicketId::new(1000)).unwrap();
        assert!(slot.occupy(TicketId::new(1001)).is_err());
        assert_eq!(slot.release(), Some(TicketId::new(1000)));
        assert!(!slot.is_occupied());
    }
}
