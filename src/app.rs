use crate::config::AppConfig;
use crate::crawler::{HttpFetcher, PageFetcher};
use crate::errors::ServerError;
use crate::forms::Form;
use crate::places::{PlacesApi, PlacesClient};
use crate::session::SessionStore;

/// Shared state handed to every request.
pub struct App {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub places: Box<dyn PlacesApi + Send + Sync>,
    pub fetcher: Box<dyn PageFetcher + Send + Sync>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let places = PlacesClient::new(config.places_base_url.clone(), config.pacing.page_token)?;
        let fetcher = HttpFetcher::new()?;
        Ok(Self::with_services(config, Box::new(places), Box::new(fetcher)))
    }

    pub fn with_services(
        config: AppConfig,
        places: Box<dyn PlacesApi + Send + Sync>,
        fetcher: Box<dyn PageFetcher + Send + Sync>,
    ) -> Self {
        Self {
            config,
            sessions: SessionStore::new(),
            places,
            fetcher,
        }
    }

    /// Key for this action; a key typed into the form is remembered for the session.
    pub fn api_key(&self, token: &str, form: &Form) -> Result<String, ServerError> {
        let remembered = self.sessions.with_session(token, |s| s.api_key.clone())?;
        let key = self
            .config
            .resolve_api_key(form.optional("api_key"), remembered.as_deref())?;

        if remembered.as_deref() != Some(key.as_str()) {
            self.sessions
                .with_session(token, |s| s.api_key = Some(key.clone()))?;
        }
        Ok(key)
    }
}
