// src/services/entry.rs

//! Giveaway entry submission.
//!
//! Posts a form-encoded entry request to the ajax endpoint and interprets
//! the JSON reply. Anything other than an explicit success is a failed
//! entry, never an error that stops the run.

use serde::Deserialize;

use crate::error::Result;
use crate::services::fetcher::Fetcher;

#[derive(Debug, Deserialize)]
struct EntryResponse {
    #[serde(rename = "type")]
    kind: String,
}

/// Submit an entry for one giveaway. Returns `true` only on a confirmed
/// success reply.
pub async fn submit_entry(
    fetcher: &Fetcher,
    base_url: &str,
    giveaway_id: &str,
    token: &str,
) -> Result<bool> {
    let url = format!("{}/ajax.php", base_url.trim_end_matches('/'));
    let form = [
        ("xsrf_token", token),
        ("do", "entry_insert"),
        ("code", giveaway_id),
    ];
    let body = fetcher.post_form(&url, &form).await?;
    Ok(interpret_response(&body))
}

/// A malformed or non-success body counts as a failed entry.
fn interpret_response(body: &str) -> bool {
    serde_json::from_str::<EntryResponse>(body)
        .map(|reply| reply.kind == "success")
        .unwrap_or(false)
}
