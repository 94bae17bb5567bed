//! Error types for parking-ledger
//!
//! Every failure the ledger can report is a variant of [`ParkingError`].
//! Errors are returned at the point of detection and only handled at the
//! CLI or shell boundary, where they are printed and the session continues.

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, ParkingError>;

/// Main error type for parking-ledger
#[derive(Error, Debug)]
pub enum ParkingError {
    /// No unoccupied slot accepts the vehicle
    #[error("No available slot for {kind} '{plate}'")]
    NoAvailableSlot { plate: String, kind: String },

    /// Ticket id is unknown or the ticket has already been paid
    #[error("Invalid ticket: {id} (unknown or already paid)")]
    InvalidTicket { id: u32 },

    /// VIP reservation could not be placed
    #[error("VIP reservation failed: {reason}")]
    ReservationFailed { reason: String },

    /// Slot id does not exist in the layout
    #[error("Slot not found: {id}")]
    SlotNotFound { id: String },

    /// Two layout entries share the same slot id
    #[error("Duplicate slot id in layout: {id}")]
    DuplicateSlot { id: String },

    /// Layout has no active slots
    #[error("Parking layout has no active slots")]
    EmptyLayout,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal prompt failed (no tty, interrupted)
    #[error("Prompt error: {0}")]
    Dialog(String),

    /// Every ticket id up to `u32::MAX` has been issued
    #[error("No ticket ids left to issue")]
    TicketIdsExhausted,

    /// A thread panicked while holding the shared ledger lock
    #[error("Ledger lock poisoned")]
    LockPoisoned,

    #[error("{0}")]
    Custom(String),
}

impl ParkingError {
    /// Create a custom error from any displayable message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Create a reservation failure with the given reason
    pub fn reservation_failed(reason: impl Into<String>) -> Self {
        Self::ReservationFailed {
            reason: reason.into(),
        }
    }

    /// Message shown to the operator
    pub fn user_message(&self) -> String {
        match self {
            Self::NoAvailableSlot { plate, kind } => {
                format!("No slot is available for {kind} '{plate}'")
            },
            Self::InvalidTicket { id } => {
                format!("Ticket {id} is invalid or has already been paid")
            },
            Self::ReservationFailed { reason } => {
                format!("Could not reserve a VIP slot: {reason}")
            },
            _ => self.to_string(),
        }
    }

    /// Hints for fixing the error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoAvailableSlot { .. } => vec![
                "Check current occupancy with 'status'".to_string(),
                "Wait for a vehicle to leave, or add slots to the layout".to_string(),
            ],
            Self::InvalidTicket { .. } => vec![
                "Verify the ticket id printed when the vehicle was parked".to_string(),
                "Each ticket can only be paid once".to_string(),
            ],
            Self::ReservationFailed { .. } => vec![
                "All VIP slots may be occupied or already reserved".to_string(),
                "Check the allowed reservation duration in the configuration".to_string(),
            ],
            Self::TicketIdsExhausted => vec![
                "Restart with a lower system.initial_ticket_id".to_string(),
            ],
            Self::DuplicateSlot { .. } | Self::EmptyLayout => vec![
                "Review the [layout] section of your configuration file".to_string(),
            ],
            Self::ConfigError(_) => vec![
                "Run 'parking-ledger config show' to inspect the effective configuration"
                    .to_string(),
            ],
            _ => vec![],
        }
    }

    /// Whether the session can continue after this error
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::LockPoisoned
                | Self::EmptyLayout
                | Self::DuplicateSlot { .. }
                | Self::ConfigError(_)
        )
    }

    /// Whether this error originates from configuration
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::DuplicateSlot { .. } | Self::EmptyLayout
        )
    }
}

impl From<config::ConfigError> for ParkingError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ParkingError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ParkingError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for ParkingError {
    fn from(err: csv::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<dialoguer::Error> for ParkingError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Dialog(err.to_string())
    }
}
