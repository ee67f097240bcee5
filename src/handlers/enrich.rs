use crate::app::App;
use crate::errors::ServerError;
use crate::forms::Form;
use crate::leads::{crawl_emails, lookup_details, LeadRecord, RowUpdate};
use crate::templates::Notice;

// Rows are copied out so the session lock is not held across network calls.
fn snapshot(app: &App, token: &str, max_rows: usize) -> Result<Vec<LeadRecord>, ServerError> {
    app.sessions
        .with_session(token, |s| s.table.head(max_rows).to_vec())
}

// Merged by place id into the live table, which may have changed meanwhile.
fn write_back(app: &App, token: &str, updates: Vec<RowUpdate>) -> Result<usize, ServerError> {
    app.sessions
        .with_session(token, |s| s.table.apply_updates(updates))
}

pub fn details(form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    let api_key = app.api_key(token, form)?;
    let max_rows = form.parse_or("max_rows", 200usize)?.clamp(1, 2000);

    let rows = snapshot(app, token, max_rows)?;
    if rows.is_empty() {
        return Ok(vec![Notice::info("Nothing to enrich yet.")]);
    }

    let (summary, updates) =
        lookup_details(app.places.as_ref(), &api_key, &rows, &app.config.pacing);
    write_back(app, token, updates)?;

    let mut notices = vec![Notice::success(format!(
        "Details enrichment complete: {} of {} rows updated.",
        summary.updated, summary.processed
    ))];
    if summary.failures > 0 {
        notices.push(Notice::warning(format!(
            "{} details requests failed.",
            summary.failures
        )));
    }
    Ok(notices)
}

pub fn emails(form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    let max_rows = form.parse_or("max_rows", 50usize)?.clamp(1, 500);
    let max_pages = form.parse_or("max_pages", 3usize)?.clamp(1, 10);

    let rows = snapshot(app, token, max_rows)?;
    if rows.is_empty() {
        return Ok(vec![Notice::info("Nothing to enrich yet.")]);
    }

    let (summary, updates) =
        crawl_emails(app.fetcher.as_ref(), &rows, max_pages, &app.config.pacing);
    write_back(app, token, updates)?;

    if summary.processed == 0 {
        return Ok(vec![Notice::info(
            "No rows with a website and no email to crawl.",
        )]);
    }
    Ok(vec![Notice::success(format!(
        "Email enrichment complete: found emails for {} of {} websites crawled.",
        summary.updated, summary.processed
    ))])
}
