//! Boundary discovery: which date does a comic's archive start at?

use chrono::NaiveDate;

use crate::fetch::{Fetcher, HttpGet};
use crate::{parse, Error, Result};

/// Loads the comic's landing page and reads the earliest available date off
/// the backward-navigation link. Used to default an unbounded start date;
/// there is no fallback, so any failure here is fatal to the run.
pub async fn find_first_date<C: HttpGet>(fetcher: &Fetcher<C>, base_url: &str) -> Result<NaiveDate> {
    let html = fetcher
        .fetch_page(base_url)
        .await
        .ok_or_else(|| Error::FirstDate {
            url: base_url.into(),
            reason: "landing page could not be fetched".into(),
        })?;
    let href = parse::extract_backward_href(html).await?;
    date_from_href(&href).ok_or_else(|| Error::FirstDate {
        url: base_url.into(),
        reason: format!("unexpected backward link {href:?}"),
    })
}

/// Reads the trailing `YYYY/MM/DD` path segments of a strip link.
fn date_from_href(href: &str) -> Option<NaiveDate> {
    let mut tail = href.trim_end_matches('/').rsplitn(4, '/');
    let day = tail.next()?.parse().ok()?;
    let month = tail.next()?.parse().ok()?;
    let year = tail.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
