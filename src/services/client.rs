// src/services/client.rs

//! Production site client for steamgifts.com.
//!
//! Composes the resilient fetcher, the page parser and the entry
//! submission into the [`SiteClient`] operations the engine needs.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Config, Page};
use crate::services::engine::SiteClient;
use crate::services::fetcher::Fetcher;
use crate::services::{entry, parser};
use crate::utils::build_filter_url;

pub struct SteamGiftsClient {
    fetcher: Fetcher,
    base_url: String,
}

impl SteamGiftsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config.http, &config.session_cookie)?;
        Ok(Self {
            fetcher,
            base_url: config.http.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SiteClient for SteamGiftsClient {
    async fn fetch_session_info(&self) -> Result<(String, u32)> {
        let html = self.fetcher.get(&self.base_url).await?;
        parser::parse_session_info(&html)
    }

    async fn fetch_filter_page(&self, template: &str, page: u32) -> Result<Page> {
        let url = build_filter_url(&self.base_url, template, page);
        let html = self.fetcher.get(&url).await?;
        parser::parse_listing_page(&html)
    }

    async fn enter_giveaway(&self, giveaway_id: &str, token: &str) -> Result<bool> {
        entry::submit_entry(&self.fetcher, &self.base_url, giveaway_id, token).await
    }
}
