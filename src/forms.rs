// forms.rs
use crate::errors::ServerError;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

/// Largest form body accepted. The subregion list and notes are the big fields.
pub const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Decoded `application/x-www-form-urlencoded` fields (body or query string).
#[derive(Debug, Default)]
pub struct Form {
    fields: HashMap<String, String>,
}

impl Form {
    pub fn parse(encoded: &str) -> Self {
        let fields = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        Self { fields }
    }

    pub fn from_query(req: &Request) -> Self {
        Self::parse(req.uri().query().unwrap_or(""))
    }

    pub fn from_body(req: &mut Request) -> Result<Self, ServerError> {
        let mut body = String::new();
        req.body_mut()
            .reader()
            .take(MAX_FORM_BYTES + 1)
            .read_to_string(&mut body)
            .map_err(|e| ServerError::BadRequest(format!("Unreadable form body: {e}")))?;

        if body.len() as u64 > MAX_FORM_BYTES {
            return Err(ServerError::BadRequest(format!(
                "Form body larger than {MAX_FORM_BYTES} bytes"
            )));
        }
        Ok(Self::parse(&body))
    }

    /// Field value, trimmed; empty when missing.
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(|v| v.trim()).unwrap_or("")
    }

    /// Field value with inner line breaks kept (textareas).
    pub fn raw(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn optional(&self, name: &str) -> Option<&str> {
        Some(self.text(name)).filter(|v| !v.is_empty())
    }

    /// HTML checkboxes are only sent when ticked.
    pub fn checkbox(&self, name: &str) -> bool {
        matches!(self.text(name), "on" | "true" | "1")
    }

    /// Parse a field, using `default` when it is blank.
    pub fn parse_or<T>(&self, name: &str, default: T) -> Result<T, ServerError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|e| ServerError::BadRequest(format!("Invalid {name} '{raw}': {e}"))),
        }
    }
}
