//! Command handlers
//!
//! Session handlers (park, unpark, reserve, status, report, export) operate on
//! a [`HandlerContext`] that owns the ledger. One-shot handlers (quote,
//! layout, config) only read the configuration.

mod base;
mod config;
mod export;
mod park;
mod quote;
mod reserve;
mod status;

pub use base::{HandlerContext, validation};
pub use config::{handle_config_path, handle_config_show};
pub use export::{ExportFormat, handle_export, tickets_to_csv};
pub use park::{ParkParams, handle_park, handle_unpark};
pub use quote::{QuoteParams, handle_layout, handle_quote};
pub use reserve::handle_reserve;
pub use status::{handle_report, handle_status};
