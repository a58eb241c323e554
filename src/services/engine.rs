// src/services/engine.rs

//! Entry engine.
//!
//! Owns the run loop: refresh the session, traverse filters in priority
//! order, paginate within each filter, decide per listing whether to
//! enter, and idle between cycles. The loop is an explicit state machine
//! so a long-running process never grows its call stack.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::error::{AppError, Result};
use crate::models::{Config, Page, Session};
use crate::notifier::{Event, Notifier};
use crate::services::budget::BudgetTracker;

/// Site operations the engine depends on.
///
/// The production implementation composes the fetcher, parser and entry
/// client; tests substitute a scripted fake.
#[async_trait]
pub trait SiteClient {
    /// Fetch the base page and return the anti-forgery token and the
    /// current point balance.
    async fn fetch_session_info(&self) -> Result<(String, u32)>;

    /// Fetch one page of a filter's listing view.
    async fn fetch_filter_page(&self, template: &str, page: u32) -> Result<Page>;

    /// Submit an entry. `true` only on a confirmed success.
    async fn enter_giveaway(&self, giveaway_id: &str, token: &str) -> Result<bool>;
}

/// Engine lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Re-read token and balance from the base page
    Refreshing,
    /// Paginating through the priority filter at this index
    TraversingFilter(usize),
    /// Waiting out the cycle-level interval
    IdleWait,
    /// The session cookie is invalid; the run cannot continue
    FatalStopped,
}

/// The entry-decision engine. Single logical worker, fully sequential.
pub struct EntryEngine<C, N> {
    config: Config,
    client: C,
    notifier: N,
    session: Session,
    budget: BudgetTracker,
}

impl<C: SiteClient, N: Notifier> EntryEngine<C, N> {
    pub fn new(config: Config, client: C, notifier: N) -> Self {
        let session = Session::new(&config.session_cookie);
        let budget = BudgetTracker::new(config.min_points);
        Self {
            config,
            client,
            notifier,
            session,
            budget,
        }
    }

    /// Run until the session is found invalid; loops indefinitely
    /// otherwise.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = State::Refreshing;
        loop {
            state = self.step(state).await?;
            if state == State::FatalStopped {
                return Err(AppError::InvalidSession);
            }
        }
    }

    /// Advance the state machine by one transition.
    pub async fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::Refreshing => self.refresh().await,
            State::TraversingFilter(index) => self.traverse_filter(index).await,
            State::IdleWait => {
                self.notifier.notify(Event::IdleWait {
                    points: self.budget.points(),
                });
                tokio::time::sleep(Duration::from_secs(self.config.pacing.idle_wait_secs)).await;
                Ok(State::Refreshing)
            }
            State::FatalStopped => Ok(State::FatalStopped),
        }
    }

    async fn refresh(&mut self) -> Result<State> {
        match self.client.fetch_session_info().await {
            Ok((token, points)) => {
                self.session.xsrf_token = token;
                self.budget.sync(points);
                self.notifier.notify(Event::BalanceSummary { points });
                if self.budget.has_available_points() {
                    Ok(State::TraversingFilter(0))
                } else {
                    Ok(State::IdleWait)
                }
            }
            Err(AppError::InvalidSession) => {
                // A stale credential will not self-heal; stop the run.
                self.notifier.notify(Event::CookieInvalid);
                Ok(State::FatalStopped)
            }
            Err(AppError::Fetch { url, message, .. }) => {
                log::warn!("Base page unavailable ({url}: {message}), waiting for next cycle");
                Ok(State::IdleWait)
            }
            Err(e) => Err(e),
        }
    }

    async fn traverse_filter(&mut self, index: usize) -> Result<State> {
        let Some(name) = self.config.priorities.get(index).cloned() else {
            // Past the last filter; the cycle is over.
            return Ok(State::IdleWait);
        };
        let template = self
            .config
            .filters
            .get(&name)
            .cloned()
            .ok_or_else(|| AppError::config(format!("filter '{name}' has no URL template")))?;

        self.notifier.notify(Event::FilterStarted {
            filter: name.clone(),
        });

        let mut page_number = 1u32;
        loop {
            if !self.budget.has_available_points() {
                // Abandon this and all remaining filters.
                return Ok(State::IdleWait);
            }

            let page = match self.client.fetch_filter_page(&template, page_number).await {
                Ok(page) => page,
                Err(AppError::Fetch { url, message, .. }) => {
                    log::warn!("Page unavailable ({url}: {message}), skipping filter {name}");
                    break;
                }
                Err(e) => return Err(e),
            };
            self.notifier.notify(Event::PageRetrieved {
                filter: name.clone(),
                page: page_number,
            });

            if page.is_empty() {
                self.notifier.notify(Event::PageEmpty {
                    filter: name.clone(),
                });
                break;
            }

            self.enter_page(&page).await?;
            page_number += 1;
        }

        Ok(State::TraversingFilter(index + 1))
    }

    /// Attempt listings in document order, respecting the budget gate
    /// before every attempt.
    async fn enter_page(&mut self, page: &Page) -> Result<()> {
        for listing in &page.giveaways {
            if !self.budget.has_available_points() {
                break;
            }

            if listing.is_pinned && !self.config.enter_pinned_games {
                continue;
            }

            if !self.budget.can_afford(listing.cost) {
                self.notifier.notify(Event::SkippedUnaffordable {
                    name: listing.name.clone(),
                    cost: listing.cost,
                });
                continue;
            }

            match self
                .client
                .enter_giveaway(&listing.id, &self.session.xsrf_token)
                .await
            {
                Ok(true) => {
                    self.budget.debit(listing.cost);
                    self.notifier.notify(Event::GiveawayEntered {
                        name: listing.name.clone(),
                        cost: listing.cost,
                    });
                }
                Ok(false) => {
                    log::warn!("Entry for {} was rejected, moving on", listing.name);
                }
                Err(e) => {
                    log::warn!("Entry submission for {} failed: {e}", listing.name);
                }
            }

            self.pace().await;
        }
        Ok(())
    }

    /// Uniform random pause after each entry attempt. Deliberate
    /// submission throttle towards the target service.
    async fn pace(&self) {
        let pacing = &self.config.pacing;
        if pacing.entry_delay_max_secs == 0 {
            return;
        }
        let secs = rand::thread_rng()
            .gen_range(pacing.entry_delay_min_secs..=pacing.entry_delay_max_secs);
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }
}
