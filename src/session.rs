// session.rs
use crate::errors::ServerError;
use crate::leads::ResultTable;
use crate::templates::components::Notice;
use astra::Request;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use std::collections::HashMap;
use std::sync::Mutex;

pub const SESSION_COOKIE: &str = "lead_session";

/// Everything one browser accumulates until the server goes away.
#[derive(Debug, Default)]
pub struct Session {
    pub table: ResultTable,
    pub api_key: Option<String>,
    /// Notices shown once on the next page render.
    pub flash: Vec<Notice>,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_token() -> String {
        let mut raw = [0u8; 32];
        OsRng.fill_bytes(&mut raw);
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
    }

    /// Token from the request cookie if it names a live session,
    /// otherwise a fresh session. The flag is true when a cookie must be set.
    pub fn resolve(&self, req: &Request) -> Result<(String, bool), ServerError> {
        let mut sessions = self.lock()?;

        if let Some(token) = cookie_value(req, SESSION_COOKIE) {
            if sessions.contains_key(&token) {
                return Ok((token, false));
            }
        }

        let token = Self::new_token();
        sessions.insert(token.clone(), Session::default());
        log::debug!("New session ({} active)", sessions.len());
        Ok((token, true))
    }

    /// Run `f` against the session, creating it if it vanished.
    pub fn with_session<T, F>(&self, token: &str, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.lock()?;
        let session = sessions.entry(token.to_string()).or_default();
        Ok(f(session))
    }

    pub fn flash(&self, token: &str, notices: Vec<Notice>) -> Result<(), ServerError> {
        self.with_session(token, |s| s.flash.extend(notices))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Session>>, ServerError> {
        self.sessions.lock().map_err(|_| ServerError::InternalError)
    }
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

fn cookie_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}
