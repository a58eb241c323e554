// src/notifier.rs

//! Notification interface for user-visible bot events.
//!
//! The engine reports what it is doing through a [`Notifier`] rather than
//! printing directly, so the presentation layer stays replaceable and
//! tests can capture the event stream.

use std::fmt;

/// How loudly an event should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// A user-visible event emitted by the entry engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The session cookie no longer authenticates; the run is over
    CookieInvalid,
    /// Traversal of a priority filter began
    FilterStarted { filter: String },
    /// One listing page was retrieved
    PageRetrieved { filter: String, page: u32 },
    /// An entry was submitted and confirmed
    GiveawayEntered { name: String, cost: u32 },
    /// A listing cost more than the remaining balance
    SkippedUnaffordable { name: String, cost: u32 },
    /// A page yielded zero eligible listings; moving to the next filter
    PageEmpty { filter: String },
    /// Points or filters are exhausted; waiting before the next cycle
    IdleWait { points: u32 },
    /// Balance as re-read from the server at cycle start
    BalanceSummary { points: u32 },
}

impl Event {
    pub fn severity(&self) -> Severity {
        match self {
            Event::CookieInvalid => Severity::Error,
            Event::SkippedUnaffordable { .. } | Event::PageEmpty { .. } => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CookieInvalid => write!(f, "Cookie is not valid."),
            Event::FilterStarted { filter } => {
                write!(f, "Filtering with filter {filter}")
            }
            Event::PageRetrieved { filter, page } => {
                write!(f, "Retrieved page {page} of filter {filter}")
            }
            Event::GiveawayEntered { name, cost } => {
                write!(f, "One more game! Just entered {name} ({cost}P)")
            }
            Event::SkippedUnaffordable { name, cost } => {
                write!(f, "Not enough points to enter: {name} ({cost}P)")
            }
            Event::PageEmpty { filter } => {
                write!(f, "Page of filter {filter} is empty. Selecting next filter.")
            }
            Event::IdleWait { points } => {
                write!(f, "Waiting for more points (current balance: {points}P)")
            }
            Event::BalanceSummary { points } => {
                write!(f, "You have {points} points.")
            }
        }
    }
}

/// Sink for engine events.
pub trait Notifier {
    fn notify(&mut self, event: Event);
}

/// Forwards events to the `log` crate.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, event: Event) {
        match event.severity() {
            Severity::Info => log::info!("{event}"),
            Severity::Warn => log::warn!("{event}"),
            Severity::Error => log::error!("{event}"),
        }
    }
}
