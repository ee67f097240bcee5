use crate::app::App;
use crate::errors::ServerError;
use crate::forms::Form;
use crate::handlers;
use crate::responses::{redirect, with_cookie, ResultResp};
use crate::session::session_cookie;
use crate::templates::Notice;
use astra::Request;

/// Form actions report back through notices and then redirect home.
type Action = fn(&Form, &App, &str) -> Result<Vec<Notice>, ServerError>;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let (token, is_new) = app.sessions.resolve(&req)?;
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    let resp = match (method.as_str(), path.as_str()) {
        ("GET", "/") => handlers::leads::results_page(&req, app, &token),

        ("POST", "/settings/key") => run_action(&mut req, app, &token, handlers::leads::save_key),
        ("POST", "/search/nearby") => run_action(&mut req, app, &token, handlers::search::nearby),
        ("POST", "/search/text") => run_action(&mut req, app, &token, handlers::search::text),
        ("POST", "/search/batch") => run_action(&mut req, app, &token, handlers::search::batch),
        ("POST", "/enrich/details") => {
            run_action(&mut req, app, &token, handlers::enrich::details)
        }
        ("POST", "/enrich/emails") => run_action(&mut req, app, &token, handlers::enrich::emails),
        ("POST", "/leads/update") => run_action(&mut req, app, &token, handlers::leads::update),
        ("POST", "/leads/clear") => run_action(&mut req, app, &token, handlers::leads::clear),

        ("GET", "/export.csv") => handlers::export::csv(app, &token),
        ("GET", "/export.xlsx") => handlers::export::xlsx(app, &token),

        _ => Err(ServerError::NotFound),
    }?;

    if is_new {
        with_cookie(resp, &session_cookie(&token))
    } else {
        Ok(resp)
    }
}

fn run_action(req: &mut Request, app: &App, token: &str, action: Action) -> ResultResp {
    let form = Form::from_body(req)?;

    let notices = match action(&form, app, token) {
        Ok(notices) => notices,
        Err(e) if e.is_user_facing() => {
            log::warn!("{e}");
            vec![Notice::error(e.to_string())]
        }
        Err(e) => return Err(e),
    };

    app.sessions.flash(token, notices)?;
    redirect("/")
}
