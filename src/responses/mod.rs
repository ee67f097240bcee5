pub mod download;
pub mod errors;
pub mod html;

pub use download::{csv_response, xlsx_response};
pub use errors::{error_to_response, ResultResp};
pub use html::{html_response, redirect, with_cookie};
