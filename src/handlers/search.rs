use crate::app::App;
use crate::errors::ServerError;
use crate::forms::Form;
use crate::leads::{
    build_batch_queries, parse_subregions, run_batch, search_nearby, search_text, LeadRecord,
};
use crate::places::{NearbyRequest, TextRequest};
use crate::templates::Notice;

pub fn nearby(form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    let api_key = app.api_key(token, form)?;

    let req = NearbyRequest {
        lat: form.parse_or("lat", 42.6977)?,
        lng: form.parse_or("lng", 23.3219)?,
        radius_m: form.parse_or("radius", 3000u32)?.clamp(100, 50_000),
        keyword: form.text("keyword").to_string(),
        place_type: form.text("place_type").to_string(),
    };

    let records = search_nearby(app.places.as_ref(), &api_key, &req)?;
    store_results(app, token, records, form.checkbox("append"))
}

pub fn text(form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    let api_key = app.api_key(token, form)?;

    let query = form.text("query");
    if query.is_empty() {
        return Ok(vec![Notice::warning("Please enter a search query.")]);
    }

    let req = TextRequest::with_bias(
        query,
        form.parse_or("bias_lat", 0.0)?,
        form.parse_or("bias_lng", 0.0)?,
        form.parse_or("bias_radius", 0u32)?.min(50_000),
    );

    let records = search_text(app.places.as_ref(), &api_key, &req)?;
    store_results(app, token, records, form.checkbox("append"))
}

fn store_results(
    app: &App,
    token: &str,
    records: Vec<LeadRecord>,
    append: bool,
) -> Result<Vec<Notice>, ServerError> {
    if records.is_empty() {
        return Ok(vec![Notice::warning(
            "No results found. Try adjusting your inputs.",
        )]);
    }

    let total = app.sessions.with_session(token, |s| {
        if append {
            s.table.append(records);
        } else {
            s.table.replace(records);
        }
        s.table.len()
    })?;

    Ok(vec![Notice::success(format!(
        "Now tracking {total} unique places."
    ))])
}

pub fn batch(form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    let api_key = app.api_key(token, form)?;

    let city = form.text("city");
    let subregions = parse_subregions(form.raw("subregions"));
    if city.is_empty() || subregions.is_empty() {
        return Ok(vec![Notice::warning(
            "Please provide a City and at least one Subregion.",
        )]);
    }

    let queries = build_batch_queries(form.text("keyword"), city, &subregions);
    log::info!("Batch for {city}: {} queries", queries.len());

    let outcome = run_batch(
        app.places.as_ref(),
        &api_key,
        &queries,
        app.config.pacing.between_queries,
    );

    let mut notices: Vec<Notice> = outcome
        .failures
        .iter()
        .map(|f| Notice::warning(format!("Error searching '{}': {}", f.query, f.error)))
        .collect();

    if outcome.table.is_empty() {
        notices.push(Notice::warning(
            "Batch finished, but no results returned. Try different keyword or subregions.",
        ));
        return Ok(notices);
    }

    let succeeded = outcome.queries - outcome.failure_count();
    let total = app
        .sessions
        .with_session(token, |s| {
            s.table.merge(outcome.table);
            s.table.len()
        })?;

    notices.push(Notice::success(format!(
        "Batch complete ({succeeded} of {} queries succeeded). Now tracking {total} unique places.",
        outcome.queries
    )));
    Ok(notices)
}
