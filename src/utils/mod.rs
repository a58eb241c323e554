// src/utils/mod.rs

//! Utility functions and helpers.

/// Build the paginated listing URL for a filter template.
///
/// Templates are relative to `{base}/giveaways/` and carry one `{page}`
/// placeholder, e.g. `search?page={page}&type=wishlist`.
pub fn build_filter_url(base: &str, template: &str, page: u32) -> String {
    format!(
        "{}/giveaways/{}",
        base.trim_end_matches('/'),
        template.replace("{page}", &page.to_string())
    )
}

/// Extract the giveaway code from a listing href.
///
/// Links look like `/giveaway/AbCd3/some-game-name`; the code is the
/// second path segment.
pub fn extract_giveaway_id(href: &str) -> Option<String> {
    let pattern = regex::Regex::new(r"^/giveaway/([A-Za-z0-9]+)(?:/|$)").ok()?;
    pattern
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}
