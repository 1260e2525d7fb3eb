//! Structural extraction from fetched pages.
//!
//! `scraper::Html` isn't `Send`, so every parse runs to completion inside
//! `spawn_blocking` and only owned strings cross back into async land.

use scraper::{Html, Selector};
use tokio::task::spawn_blocking;

use crate::{Error, Result};

/// The strip image on an item page.
const COMIC_IMAGE_SELECTOR: &str = ".item-comic-image img";
/// The backward-navigation control on a landing page.
const BACKWARD_NAV_SELECTOR: &str = ".fa-backward";

/// Extracts the strip image address from an item page.
pub(crate) async fn extract_image_url(html: String) -> Result<String> {
    spawn_blocking(move || {
        let doc = Html::parse_document(&html);
        select_attr(&doc, COMIC_IMAGE_SELECTOR, "src")
    })
    .await?
}

/// Extracts the backward-navigation link from a landing page.
pub(crate) async fn extract_backward_href(html: String) -> Result<String> {
    spawn_blocking(move || {
        let doc = Html::parse_document(&html);
        select_attr(&doc, BACKWARD_NAV_SELECTOR, "href")
    })
    .await?
}

/// Pulls `attr` off the first element matching `sel_str`. A miss means the
/// page doesn't have the structure we expect, which is unrecoverable for
/// that page.
fn select_attr(doc: &Html, sel_str: &str, attr: &str) -> Result<String> {
    let selector = create_selector(sel_str)?;
    doc.select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_owned)
        .ok_or_else(|| Error::ParseMissingSelector(sel_str.into()))
}

#[inline]
pub(crate) fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
