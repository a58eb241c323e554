// src/lib.rs

//! sgbot Library
//!
//! Automated giveaway entry for steamgifts.com: traverses configured
//! listing filters in priority order and enters affordable giveaways
//! until the point budget runs out.

pub mod error;
pub mod models;
pub mod notifier;
pub mod services;
pub mod utils;
