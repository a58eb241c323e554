// src/services/parser.rs

//! Listing page parser.
//!
//! Extracts eligible giveaway rows, the anti-forgery token, and the point
//! balance from fetched HTML using CSS selectors. The selectors target the
//! steamgifts.com page schema and are the only place that schema lives.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{GiveawayListing, Page};
use crate::utils::extract_giveaway_id;

/// Giveaway rows the user has not entered yet. Entered rows render with
/// the `is-faded` class and are excluded here, so the engine never sees
/// them.
const ROW_SELECTOR: &str = "div.giveaway__row-inner-wrap:not(.is-faded)";
const NAME_SELECTOR: &str = "a.giveaway__heading__name";
const COST_SELECTOR: &str = "span.giveaway__heading__thin";
const TOKEN_SELECTOR: &str = "input[name=\"xsrf_token\"]";
const POINTS_SELECTOR: &str = "span.nav__points";

/// Parse one listing page into eligible giveaways, in document order.
pub fn parse_listing_page(html: &str) -> Result<Page> {
    let document = Html::parse_document(html);
    let row_sel = parse_selector(ROW_SELECTOR)?;
    let name_sel = parse_selector(NAME_SELECTOR)?;
    let cost_sel = parse_selector(COST_SELECTOR)?;

    let giveaways = document
        .select(&row_sel)
        .filter_map(|row| parse_listing_row(&row, &name_sel, &cost_sel))
        .collect();

    Ok(Page { giveaways })
}

/// Parse the anti-forgery token and point balance from the base page.
///
/// Both are required together; their absence after a successful fetch
/// means the session cookie is invalid, which is distinct from a merely
/// empty listing page.
pub fn parse_session_info(html: &str) -> Result<(String, u32)> {
    let document = Html::parse_document(html);
    let token_sel = parse_selector(TOKEN_SELECTOR)?;
    let points_sel = parse_selector(POINTS_SELECTOR)?;

    let token = document
        .select(&token_sel)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string);
    let points = document
        .select(&points_sel)
        .next()
        .and_then(|span| span.text().collect::<String>().trim().parse::<u32>().ok());

    match (token, points) {
        (Some(token), Some(points)) => Ok((token, points)),
        _ => Err(AppError::InvalidSession),
    }
}

fn parse_listing_row(
    row: &ElementRef,
    name_sel: &Selector,
    cost_sel: &Selector,
) -> Option<GiveawayListing> {
    let heading = row.select(name_sel).next()?;
    let name = heading.text().collect::<String>().trim().to_string();
    let id = extract_giveaway_id(heading.value().attr("href")?)?;

    // The cost lives in the last thin heading span. A row without one
    // cannot be evaluated and is skipped, not treated as free.
    let cost_span = row.select(cost_sel).last()?;
    let cost = parse_cost(&cost_span.text().collect::<String>())?;

    // Pinned rows render with exactly two classes on the wrapper node.
    // Site-specific heuristic, preserved as-is.
    let is_pinned = row.value().classes().count() == 2;

    Some(GiveawayListing {
        id,
        name,
        cost,
        is_pinned,
    })
}

fn parse_cost(text: &str) -> Option<u32> {
    text.replace(['(', ')', 'P'], "").trim().parse().ok()
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(classes: &str, name: &str, code: &str, spans: &str) -> String {
        format!(
            r#"<div class="{classes}">
                <h2 class="giveaway__heading">
                    <a class="giveaway__heading__name" href="/giveaway/{code}/{name}">{name}</a>
                    {spans}
                </h2>
            </div>"#
        )
    }

    #[test]
    fn test_parse_listing_page_extracts_rows_in_document_order() {
        let html = format!(
            "{}{}",
            row(
                "giveaway__row-inner-wrap",
                "First",
                "aaaaa",
                r#"<span class="giveaway__heading__thin">(2 Copies)</span>
                   <span class="giveaway__heading__thin">(30P)</span>"#
            ),
            row(
                "giveaway__row-inner-wrap",
                "Second",
                "bbbbb",
                r#"<span class="giveaway__heading__thin">(15P)</span>"#
            ),
        );

        let page = parse_listing_page(&html).unwrap();
        assert_eq!(page.giveaways.len(), 2);
        assert_eq!(page.giveaways[0].id, "aaaaa");
        assert_eq!(page.giveaways[0].name, "First");
        // Last thin span wins over the copies span
        assert_eq!(page.giveaways[0].cost, 30);
        assert_eq!(page.giveaways[1].id, "bbbbb");
        assert_eq!(page.giveaways[1].cost, 15);
    }

    #[test]
    fn test_entered_rows_are_excluded() {
        let html = row(
            "giveaway__row-inner-wrap is-faded",
            "Entered",
            "ccccc",
            r#"<span class="giveaway__heading__thin">(10P)</span>"#,
        );

        let page = parse_listing_page(&html).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_row_without_cost_span_is_skipped() {
        let html = row("giveaway__row-inner-wrap", "NoCost", "ddddd", "");
        let page = parse_listing_page(&html).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_pinned_detection_uses_class_count() {
        let html = format!(
            "{}{}",
            row(
                "giveaway__row-inner-wrap pinned",
                "Sticky",
                "eeeee",
                r#"<span class="giveaway__heading__thin">(5P)</span>"#
            ),
            row(
                "giveaway__row-inner-wrap",
                "Plain",
                "fffff",
                r#"<span class="giveaway__heading__thin">(5P)</span>"#
            ),
        );

        let page = parse_listing_page(&html).unwrap();
        assert!(page.giveaways[0].is_pinned);
        assert!(!page.giveaways[1].is_pinned);
    }

    #[test]
    fn test_parse_session_info() {
        let html = r#"
            <form><input type="hidden" name="xsrf_token" value="tok123"></form>
            <a href="/account"><span class="nav__points">247</span></a>
        "#;
        let (token, points) = parse_session_info(html).unwrap();
        assert_eq!(token, "tok123");
        assert_eq!(points, 247);
    }

    #[test]
    fn test_missing_token_is_invalid_session() {
        let html = r#"<span class="nav__points">100</span>"#;
        assert!(matches!(
            parse_session_info(html),
            Err(AppError::InvalidSession)
        ));
    }

    #[test]
    fn test_missing_points_is_invalid_session() {
        let html = r#"<input name="xsrf_token" value="tok">"#;
        assert!(matches!(
            parse_session_info(html),
            Err(AppError::InvalidSession)
        ));
    }

    #[test]
    fn test_parse_cost_strips_decorations() {
        assert_eq!(parse_cost("(30P)"), Some(30));
        assert_eq!(parse_cost(" (5P) "), Some(5));
        assert_eq!(parse_cost("(2 Copies)"), None);
    }
}
