use crate::config::{pause, Pacing};
use crate::crawler::{crawl_site, PageFetcher};
use crate::leads::record::LeadRecord;
use crate::places::{PlaceDetails, PlacesApi};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichSummary {
    pub processed: usize,
    pub updated: usize,
    pub failures: usize,
}

/// What a lookup or crawl found for one place.
#[derive(Debug, Clone)]
pub enum Enrichment {
    Details(PlaceDetails),
    /// Addresses already joined with `"; "`.
    Emails(String),
}

#[derive(Debug, Clone)]
pub struct RowUpdate {
    pub place_id: String,
    pub found: Enrichment,
}

/// Fetch details for each of `rows`. Nothing is written; the caller applies
/// the updates to whichever table still holds these places.
pub fn lookup_details(
    api: &dyn PlacesApi,
    api_key: &str,
    rows: &[LeadRecord],
    pacing: &Pacing,
) -> (EnrichSummary, Vec<RowUpdate>) {
    let mut summary = EnrichSummary::default();
    let mut updates = Vec::new();

    for row in rows {
        summary.processed += 1;

        match api.place_details(api_key, &row.place_id) {
            Ok(details) => {
                updates.push(RowUpdate {
                    place_id: row.place_id.clone(),
                    found: Enrichment::Details(details),
                });
                summary.updated += 1;
            }
            Err(e) => {
                log::warn!("Details for {} failed: {e}", row.place_id);
                summary.failures += 1;
            }
        }

        pause(pacing.between_details);
    }

    log::info!(
        "Details enrichment: {} processed, {} updated, {} failed",
        summary.processed,
        summary.updated,
        summary.failures
    );
    (summary, updates)
}

/// Crawl the website of each row that has one but no email yet.
/// `processed` counts crawled sites only.
pub fn crawl_emails(
    fetcher: &dyn PageFetcher,
    rows: &[LeadRecord],
    max_pages: usize,
    pacing: &Pacing,
) -> (EnrichSummary, Vec<RowUpdate>) {
    let mut summary = EnrichSummary::default();
    let mut updates = Vec::new();

    let candidates = rows
        .iter()
        .filter(|r| !r.website.trim().is_empty() && r.email.trim().is_empty());

    for row in candidates {
        summary.processed += 1;

        let emails = crawl_site(fetcher, &row.website, max_pages, pacing.between_pages);
        if emails.is_empty() {
            log::debug!("No emails on {}", row.website);
        } else {
            updates.push(RowUpdate {
                place_id: row.place_id.clone(),
                found: Enrichment::Emails(emails.into_iter().collect::<Vec<_>>().join("; ")),
            });
            summary.updated += 1;
        }

        pause(pacing.between_sites);
    }

    log::info!(
        "Email enrichment: {} sites crawled, {} had emails",
        summary.processed,
        summary.updated
    );
    (summary, updates)
}
