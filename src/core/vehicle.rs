use crate::error::{ParkingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle category with per-kind data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VehicleKind {
    Motorcycle,
    Car,
    /// Electric vehicle; `charging_required` adds a flat charging fee
    Ev { charging_required: bool },
}

impl VehicleKind {
    /// Whether this is an electric vehicle
    pub const fn is_ev(&self) -> bool {
        matches!(self, Self::Ev { .. })
    }

    /// Whether an EV asked for charging
    pub const fn needs_charging(&self) -> bool {
        matches!(
            self,
            Self::Ev {
                charging_required: true
            }
        )
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Motorcycle => "Motorcycle",
            Self::Car => "Car",
            Self::Ev { .. } => "EV",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleKind {
    type Err = ParkingError;

    /// Parses a kind name; EVs parse without charging
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "motorcycle" | "motor" | "bike" => Ok(Self::Motorcycle),
            "car" => Ok(Self::Car),
            "ev" | "electric" => Ok(Self::Ev {
                charging_required: false,
            }),
            _ => Err(ParkingError::InvalidInput(format!(
                "Invalid vehicle kind: {s}. Must be one of: motorcycle, car, ev"
            ))),
        }
    }
}

/// A vehicle presented at the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    plate: String,
    owner: String,
    kind: VehicleKind,
    arrival_time: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Create a vehicle; the plate is trimmed and must not be empty
    pub fn new(
        plate: impl Into<String>,
        owner: impl Into<String>,
        kind: VehicleKind,
    ) -> Result<Self> {
        let plate = plate.into().trim().to_string();
        if plate.is_empty() {
            return Err(ParkingError::InvalidInput(
                "Vehicle plate cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            plate,
            owner: owner.into().trim().to_string(),
            kind,
            arrival_time: None,
        })
    }

    pub fn motorcycle(plate: impl Into<String>, owner: impl Into<String>) -> Result<Self> {
        Self::new(plate, owner, VehicleKind::Motorcycle)
    }

    pub fn car(plate: impl Into<String>, owner: impl Into<String>) -> Result<Self> {
        Self::new(plate, owner, VehicleKind::Car)
    }

    pub fn ev(
        plate: impl Into<String>,
        owner: impl Into<String>,
        charging_required: bool,
    ) -> Result<Self> {
        Self::new(plate, owner, VehicleKind::Ev { charging_required })
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub const fn kind(&self) -> VehicleKind {
        self.kind
    }

    /// When the vehicle was parked, if it has been
    pub const fn arrival_time(&self) -> Option<DateTime<Utc>> {
        self.arrival_time
    }

    /// Stamp the arrival time; only the first stamp is kept
    pub(crate) fn mark_arrived(&mut self, at: DateTime<Utc>) {
        if self.arrival_time.is_none() {
            self.arrival_time = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plate_is_trimmed_and_required() {
        let car = Vehicle::car("  B 1234 XY ", "Andi").unwrap();
        assert_eq!(car.plate(), "B 1234 XY");

        assert!(matches!(
            Vehicle::car("   ", "Andi"),
            Err(ParkingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Car".parse::<VehicleKind>().unwrap(), VehicleKind::Car);
        assert_eq!(
            "motor".parse::<VehicleKind>().unwrap(),
            VehicleKind::Motorcycle
        );
        assert!("ev".parse::<VehicleKind>().unwrap().is_ev());
        assert!("truck".parse::<VehicleKind>().is_err());
    }

    #[test]
    fn test_charging_only_for_ev() {
        assert!(VehicleKind::Ev { charging_required: true }.needs_charging());
        assert!(!VehicleKind::Ev { charging_required: false }.needs_charging());
        assert!(!VehicleKind::Car.needs_charging());
    }

    #[test]
    fn test_arrival_time_set_once() {
        let mut bike = Vehicle::motorcycle("D 77", "Sari").unwrap();
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        bike.mark_arrived(first);
        bike.mark_arrived(second);
        assert_eq!(bike.arrival_time(), Some(first));
    }
}
