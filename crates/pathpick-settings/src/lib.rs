//! PathPick Settings Crate
//!
//! Persisted user preferences: the field configuration, export defaults and
//! interactive editing steps.

pub mod config;
pub mod error;

pub use config::{Config, EditingSettings};
pub use error::{Result, SettingsError};
