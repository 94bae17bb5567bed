//! Core domain types: vehicles, slots, tickets and fee rules

mod builders;
mod fee;
mod slot;
mod ticket;
mod vehicle;

pub use builders::VehicleBuilder;
pub use fee::RateTable;
pub use slot::{Reservation, Slot, SlotKind, SlotType};
pub use ticket::{PaymentRecord, Ticket, TicketId, TicketState};
pub use vehicle::{Vehicle, VehicleKind};
