use crate::app::App;
use crate::responses::{csv_response, xlsx_response, ResultResp};

pub fn csv(app: &App, token: &str) -> ResultResp {
    let bytes = app
        .sessions
        .with_session(token, |s| s.table.export_csv_bytes())??;
    csv_response(bytes, "leads_full.csv")
}

pub fn xlsx(app: &App, token: &str) -> ResultResp {
    let bytes = app
        .sessions
        .with_session(token, |s| s.table.export_xlsx())??;
    xlsx_response(bytes, "leads_full.xlsx")
}
