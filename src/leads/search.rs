// search.rs
use crate::config::pause;
use crate::leads::query::QueryDescriptor;
use crate::leads::record::LeadRecord;
use crate::leads::table::ResultTable;
use crate::places::{NearbyRequest, PlacesApi, RequestError, TextRequest};
use std::time::Duration;

#[derive(Debug)]
pub struct QueryFailure {
    pub query: String,
    pub error: RequestError,
}

/// Result of a city + subregions batch. Failed queries are listed, not fatal.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub table: ResultTable,
    pub queries: usize,
    pub failures: Vec<QueryFailure>,
}

impl BatchOutcome {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

pub fn nearby_origin(req: &NearbyRequest) -> String {
    format!("Nearby@{:.4},{:.4}", req.lat, req.lng)
}

pub fn text_origin(req: &TextRequest) -> String {
    format!("Text:{}", req.query)
}

pub fn search_nearby(
    api: &dyn PlacesApi,
    api_key: &str,
    req: &NearbyRequest,
) -> Result<Vec<LeadRecord>, RequestError> {
    let places = api.nearby_search(api_key, req)?;
    log::info!(
        "Nearby search at {},{} r={}m returned {} places",
        req.lat,
        req.lng,
        req.radius_m,
        places.len()
    );
    Ok(LeadRecord::from_places(&places, &nearby_origin(req)))
}

pub fn search_text(
    api: &dyn PlacesApi,
    api_key: &str,
    req: &TextRequest,
) -> Result<Vec<LeadRecord>, RequestError> {
    let places = api.text_search(api_key, req)?;
    log::info!("Text search '{}' returned {} places", req.query, places.len());
    Ok(LeadRecord::from_places(&places, &text_origin(req)))
}

/// Run every query in order, merging and deduplicating as we go.
pub fn run_batch(
    api: &dyn PlacesApi,
    api_key: &str,
    queries: &[QueryDescriptor],
    between_queries: Duration,
) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        queries: queries.len(),
        ..BatchOutcome::default()
    };

    for (i, query) in queries.iter().enumerate() {
        match api.text_search(api_key, &TextRequest::simple(query.text.clone())) {
            Ok(places) => {
                let added = outcome
                    .table
                    .append(LeadRecord::from_places(&places, &query.origin()));
                log::info!(
                    "[{}/{}] '{}': {} places, {} new",
                    i + 1,
                    queries.len(),
                    query.text,
                    places.len(),
                    added
                );
            }
            Err(error) => {
                log::warn!("[{}/{}] '{}' failed: {error}", i + 1, queries.len(), query.text);
                outcome.failures.push(QueryFailure {
                    query: query.text.clone(),
                    error,
                });
            }
        }

        if i + 1 < queries.len() {
            pause(between_queries);
        }
    }

    outcome
}
