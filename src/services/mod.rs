// src/services/mod.rs

//! Service layer for the bot.
//!
//! This module contains the working parts of the entry pipeline:
//! - Resilient HTTP retrieval (`Fetcher`)
//! - Listing page parsing (`parser`)
//! - Entry submission (`entry`)
//! - Point accounting (`BudgetTracker`)
//! - The orchestrating run loop (`EntryEngine`)

pub mod budget;
pub mod client;
pub mod engine;
pub mod entry;
pub mod fetcher;
pub mod parser;

// Re-export primary service types
pub use budget::BudgetTracker;
pub use client::SteamGiftsClient;
pub use engine::{EntryEngine, SiteClient, State};
pub use fetcher::Fetcher;
