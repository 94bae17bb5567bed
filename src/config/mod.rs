//! Configuration for parking-ledger
//!
//! Settings are layered: built-in defaults, then an optional TOML/YAML/JSON
//! file, then `PARKING__`-prefixed environment variables
//! (for example `PARKING__RATES__CAR_PER_HOUR=6000`).

use crate::core::{RateTable, SlotType};
use crate::error::{ParkingError, Result};
use config::{Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "parking-ledger.toml";

const ENV_PREFIX: &str = "PARKING";
const ENV_SEPARATOR: &str = "__";

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub rates: RateTable,
    pub layout: LayoutConfig,
    pub reservation: ReservationConfig,
    pub system: SystemConfig,
}

/// One physical slot in the layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub id: String,
    pub kind: SlotType,
    pub level: i32,
    /// Inactive slots are skipped when the ledger is built
    #[serde(default = "default_true")]
    pub active: bool,
}

impl SlotDefinition {
    pub fn new(id: impl Into<String>, kind: SlotType, level: i32) -> Self {
        Self {
            id: id.into(),
            kind,
            level,
            active: true,
        }
    }
}

/// Slot layout, in allocation scan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub slots: Vec<SlotDefinition>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slots: vec![
                // Level 1
                SlotDefinition::new("R1", SlotType::Regular, 1),
                SlotDefinition::new("R2", SlotType::Regular, 1),
                SlotDefinition::new("R3", SlotType::Regular, 1),
                SlotDefinition::new("E1", SlotType::Ev, 1),
                SlotDefinition::new("E2", SlotType::Ev, 1),
                // Level 2
                SlotDefinition::new("V1", SlotType::Vip, 2),
                SlotDefinition::new("V2", SlotType::Vip, 2),
                SlotDefinition::new("V3", SlotType::Vip, 2),
                SlotDefinition::new("R4", SlotType::Regular, 2),
                SlotDefinition::new("R5", SlotType::Regular, 2),
            ],
        }
    }
}

impl LayoutConfig {
    /// Active slots in scan order
    pub fn active_slots(&self) -> impl Iterator<Item = &SlotDefinition> {
        self.slots.iter().filter(|slot| slot.active)
    }
}

/// VIP reservation limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationConfig {
    pub enabled: bool,
    pub min_hours: u32,
    pub max_hours: u32,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_hours: 1,
            max_hours: 72,
        }
    }
}

impl ReservationConfig {
    /// Check a requested duration against the limits
    pub fn check_duration(&self, hours: u32) -> Result<()> {
        if !self.enabled {
            return Err(ParkingError::reservation_failed(
                "VIP reservations are disabled",
            ));
        }
        if hours < self.min_hours || hours > self.max_hours {
            return Err(ParkingError::reservation_failed(format!(
                "duration must be between {} and {} hours, got {hours}",
                self.min_hours, self.max_hours
            )));
        }
        Ok(())
    }
}

/// General system settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// First ticket id handed out by a new ledger
    pub initial_ticket_id: u32,
    /// Currency label used when printing amounts
    pub currency: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            initial_ticket_id: 1000,
            currency: "Rp".to_string(),
        }
    }
}

impl Config {
    /// Default configuration file location for this platform
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "parking-ledger")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load_or_default() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            },
            None => {
                if let Some(default_path) = Self::default_path() {
                    tracing::debug!(
                        "Looking for optional configuration at {}",
                        default_path.display()
                    );
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            },
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Sanity checks that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let rates = &self.rates;
        let amounts = [
            ("motorcycle_per_hour", rates.motorcycle_per_hour),
            ("car_per_hour", rates.car_per_hour),
            ("ev_per_hour", rates.ev_per_hour),
            ("ev_charging_fee", rates.ev_charging_fee),
            ("vip_surcharge_percent", rates.vip_surcharge_percent),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ParkingError::ConfigError(format!(
                    "rates.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !(0.0..=100.0).contains(&rates.long_stay_discount_percent) {
            return Err(ParkingError::ConfigError(format!(
                "rates.long_stay_discount_percent must be within 0..=100, got {}",
                rates.long_stay_discount_percent
            )));
        }
        if rates.minimum_hours == 0 {
            return Err(ParkingError::ConfigError(
                "rates.minimum_hours must be at least 1".to_string(),
            ));
        }
        let reservation = &self.reservation;
        if reservation.min_hours == 0 || reservation.min_hours > reservation.max_hours {
            return Err(ParkingError::ConfigError(format!(
                "reservation hours must satisfy 1 <= min_hours <= max_hours, got {}..{}",
                reservation.min_hours, reservation.max_hours
            )));
        }
        Ok(())
    }

    /// Render as YAML for display
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

const fn default_true() -> bool {
    true
}
