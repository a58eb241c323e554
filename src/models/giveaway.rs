// src/models/giveaway.rs

//! Giveaway listing data structures.

/// One eligible giveaway row on a listing page.
///
/// Fields are computed eagerly at parse time; the value is never mutated
/// or persisted across pages. Rows the user already entered are filtered
/// out by the parser and never become a `GiveawayListing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayListing {
    /// Unique giveaway code taken from the listing link
    pub id: String,

    /// Display name of the game
    pub name: String,

    /// Entry cost in points
    pub cost: u32,

    /// Whether the row is a promoted/sticky giveaway
    pub is_pinned: bool,
}

/// Parsed result of one listing-page fetch.
///
/// Listings are kept in document order, which is also the entry priority
/// within the page.
#[derive(Debug, Default)]
pub struct Page {
    pub giveaways: Vec<GiveawayListing>,
}

impl Page {
    /// A page with zero eligible listings. Emptiness is the sole
    /// termination signal for a filter's pagination; the site has no
    /// explicit last-page marker.
    pub fn is_empty(&self) -> bool {
        self.giveaways.is_empty()
    }
}
