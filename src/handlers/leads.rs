use crate::app::App;
use crate::errors::ServerError;
use crate::forms::Form;
use crate::leads::CrmEdit;
use crate::responses::{html_response, ResultResp};
use crate::templates::pages::{home_page, HomeVm};
use crate::templates::Notice;
use astra::Request;

pub fn results_page(req: &Request, app: &App, token: &str) -> ResultResp {
    let query = Form::from_query(req);
    let page = query.parse_or("page", 1usize)?;
    let page_size = query.parse_or("page_size", 20usize)?.clamp(10, 200);

    let markup = app.sessions.with_session(token, |s| {
        let notices = std::mem::take(&mut s.flash);
        home_page(&HomeVm {
            notices: &notices,
            has_api_key: s.api_key.is_some() || app.config.api_key.is_some(),
            total: s.table.len(),
            page: s.table.page(page, page_size),
            page_size,
        })
    })?;

    html_response(markup)
}

pub fn save_key(form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    let Some(key) = form.optional("api_key") else {
        return Ok(vec![Notice::warning("No key entered.")]);
    };
    let key = key.to_string();
    app.sessions.with_session(token, |s| s.api_key = Some(key))?;
    Ok(vec![Notice::success("API key saved for this session.")])
}

pub fn update(form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    let place_id = form
        .optional("place_id")
        .ok_or_else(|| ServerError::BadRequest("missing place_id".into()))?;

    let edit = CrmEdit {
        status: form.text("status").to_string(),
        contact_name: form.text("contact_name").to_string(),
        email: form.text("email").to_string(),
        owner: form.text("owner").to_string(),
        deal_value: form.text("deal_value").to_string(),
        last_contacted: form.text("last_contacted").to_string(),
        notes: form.text("notes").to_string(),
    };

    let updated = app
        .sessions
        .with_session(token, |s| s.table.update_crm(place_id, edit))?;

    if updated {
        Ok(vec![Notice::success("Changes saved.")])
    } else {
        Ok(vec![Notice::warning("That place is no longer in the table.")])
    }
}

pub fn clear(_form: &Form, app: &App, token: &str) -> Result<Vec<Notice>, ServerError> {
    app.sessions.with_session(token, |s| s.table.clear())?;
    Ok(vec![Notice::info("Results cleared.")])
}
