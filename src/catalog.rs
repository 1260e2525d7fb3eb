//! The `ls` collaborator: enumerates every comic the site publishes by
//! walking the alphabetical index pages. Stateless extraction, no
//! concurrency, nothing here touches the fetch pipeline.

use std::collections::BTreeMap;

use scraper::Html;
use tokio::task::spawn_blocking;
use tracing::warn;

use crate::fetch::{Fetcher, HttpGet};
use crate::parse::create_selector;
use crate::{Result, SITE};

/// Index page identifiers of the a-to-z listing (`%23` is the `#` bucket).
const SECTIONS: [&str; 7] = ["a-b", "c-e", "f-i", "j-n", "o-r", "s-t", "u-%23"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comic {
    pub slug: String,
    pub title: String,
    pub author: String,
}

/// Fetches all index sections and returns the comics sorted by slug.
/// A section that can't be fetched is logged and left out rather than
/// failing the whole listing.
pub async fn list_comics<C: HttpGet>(fetcher: &Fetcher<C>) -> Result<Vec<Comic>> {
    let mut comics = BTreeMap::new();
    for section in SECTIONS {
        let url = format!("{SITE}/comics/a-to-z?page={section}");
        let Some(html) = fetcher.fetch_page(&url).await else {
            warn!(section, "Couldn't fetch this catalog section. Skipping...");
            continue;
        };
        for comic in parse_section(html).await? {
            comics.insert(comic.slug.clone(), comic);
        }
    }
    Ok(comics.into_values().collect())
}

pub fn print_listing(comics: &[Comic]) {
    for comic in comics {
        println!("{:>24}: {:>24} - {}", comic.slug, comic.title, comic.author);
    }
}

/// Extracts the comic entries of one index page. Entries missing the parts
/// we need are dropped, not errors; index markup varies more than strip
/// pages do.
async fn parse_section(html: String) -> Result<Vec<Comic>> {
    spawn_blocking(move || -> Result<Vec<Comic>> {
        let doc = Html::parse_document(&html);
        let item_selector = create_selector(".amu-media-item-link")?;
        let body_selector = create_selector(".media-body")?;

        let mut comics = Vec::new();
        for item in doc.select(&item_selector) {
            let Some(href) = item.value().attr("href") else {
                continue;
            };
            let slug = href.trim_matches('/').to_owned();
            if slug.is_empty() {
                continue;
            }

            let texts: Vec<String> = item
                .select(&body_selector)
                .next()
                .map(|body| {
                    body.text()
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default();
            let Some(title) = texts.first() else {
                continue;
            };
            let author = texts.get(1).cloned().unwrap_or_else(|| "?".to_owned());

            comics.push(Comic {
                slug,
                title: title.clone(),
                author,
            });
        }
        Ok(comics)
    })
    .await?
}
