// src/models/mod.rs

//! Domain models for the bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod giveaway;
mod session;

// Re-export all public types
pub use config::{Config, HttpConfig, PacingConfig};
pub use giveaway::{GiveawayListing, Page};
pub use session::Session;
