use super::{Vehicle, VehicleKind};
use crate::error::{ParkingError, Result};

/// Builder for creating Vehicle instances from loosely collected input
#[derive(Default)]
pub struct VehicleBuilder {
    plate: Option<String>,
    owner: Option<String>,
    kind: Option<VehicleKind>,
    charging_required: bool,
}

impl VehicleBuilder {
    /// Create a new vehicle builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plate
    #[must_use]
    pub fn plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = Some(plate.into());
        self
    }

    /// Set the owner name
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the vehicle kind
    #[must_use]
    pub const fn kind(mut self, kind: VehicleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Request charging; only meaningful for EVs
    #[must_use]
    pub const fn charging(mut self, charging_required: bool) -> Self {
        self.charging_required = charging_required;
        self
    }

    /// Build the vehicle
    ///
    /// The plate and kind are required. A charging request on a
    /// non-EV kind is rejected.
    pub fn build(self) -> Result<Vehicle> {
        let plate = self.plate.ok_or_else(|| {
            ParkingError::InvalidInput("Vehicle plate is required".to_string())
        })?;
        let kind = self.kind.ok_or_else(|| {
            ParkingError::InvalidInput("Vehicle kind is required".to_string())
        })?;

        let kind = match kind {
            VehicleKind::Ev { charging_required } => VehicleKind::Ev {
                charging_required: charging_required || self.charging_required,
            },
            other if self.charging_required => {
                return Err(ParkingError::InvalidInput(format!(
                    "Charging can only be requested for EVs, not {other}"
                )));
            },
            other => other,
        };

        Vehicle::new(plate, self.owner.unwrap_or_default(), kind)
    }
}
