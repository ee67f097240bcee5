// client.rs
use crate::config::pause;
use crate::places::models::{DetailsResponse, SearchResponse};
use crate::places::{PlaceDetails, PlaceResult, RequestError};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const USER_AGENT: &str = "LocalLeadFinder/1.0 (+local)";

/// The API hands out at most three pages (60 results) per search.
pub const MAX_PAGES: usize = 3;

const DETAIL_FIELDS: &[&str] = &[
    "place_id",
    "name",
    "formatted_address",
    "international_phone_number",
    "website",
    "url",
    "geometry/location",
    "rating",
    "user_ratings_total",
    "types",
];

#[derive(Debug, Clone, Default)]
pub struct NearbyRequest {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: u32,
    pub keyword: String,
    pub place_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct TextRequest {
    pub query: String,
    /// Optional location bias: (lat, lng, radius in meters).
    pub bias: Option<(f64, f64, u32)>,
}

impl TextRequest {
    pub fn simple(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            bias: None,
        }
    }

    /// Bias only applies when both coordinates are set and the radius is non-zero.
    pub fn with_bias(query: impl Into<String>, lat: f64, lng: f64, radius_m: u32) -> Self {
        let bias = (lat != 0.0 && lng != 0.0 && radius_m > 0).then_some((lat, lng, radius_m));
        Self {
            query: query.into(),
            bias,
        }
    }
}

/// The vendor operations the rest of the app needs.
pub trait PlacesApi {
    fn nearby_search(
        &self,
        api_key: &str,
        req: &NearbyRequest,
    ) -> Result<Vec<PlaceResult>, RequestError>;

    fn text_search(&self, api_key: &str, req: &TextRequest)
        -> Result<Vec<PlaceResult>, RequestError>;

    fn place_details(&self, api_key: &str, place_id: &str) -> Result<PlaceDetails, RequestError>;
}

pub struct PlacesClient {
    client: Client,
    base_url: String,
    page_token_delay: Duration,
}

impl PlacesClient {
    pub fn new(base_url: impl Into<String>, page_token_delay: Duration) -> Result<Self, RequestError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            page_token_delay,
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let url = format!("{}/{endpoint}/json", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        decode_response(status, text)
    }

    fn search(
        &self,
        endpoint: &str,
        base_params: Params,
    ) -> Result<Vec<PlaceResult>, RequestError> {
        collect_pages(self.page_token_delay, |token| {
            self.get_json(endpoint, &page_params(&base_params, token))
        })
    }
}

impl PlacesApi for PlacesClient {
    fn nearby_search(
        &self,
        api_key: &str,
        req: &NearbyRequest,
    ) -> Result<Vec<PlaceResult>, RequestError> {
        self.search("nearbysearch", nearby_params(api_key, req))
    }

    fn text_search(
        &self,
        api_key: &str,
        req: &TextRequest,
    ) -> Result<Vec<PlaceResult>, RequestError> {
        self.search("textsearch", text_params(api_key, req))
    }

    fn place_details(&self, api_key: &str, place_id: &str) -> Result<PlaceDetails, RequestError> {
        let resp: DetailsResponse = self.get_json("details", &details_params(api_key, place_id))?;
        if resp.status != "OK" {
            return Err(RequestError::from_status(&resp.status, resp.error_message));
        }

        resp.result
            .ok_or_else(|| RequestError::Malformed("details response without result".into()))
    }
}

type Params = Vec<(&'static str, String)>;

fn nearby_params(api_key: &str, req: &NearbyRequest) -> Params {
    let mut params = vec![
        ("key", api_key.to_string()),
        ("location", format!("{},{}", req.lat, req.lng)),
        ("radius", req.radius_m.to_string()),
    ];
    if !req.keyword.trim().is_empty() {
        params.push(("keyword", req.keyword.trim().to_string()));
    }
    if !req.place_type.trim().is_empty() {
        params.push(("type", req.place_type.trim().to_string()));
    }
    params
}

fn text_params(api_key: &str, req: &TextRequest) -> Params {
    let mut params = vec![("key", api_key.to_string()), ("query", req.query.clone())];
    if let Some((lat, lng, radius)) = req.bias {
        params.push(("location", format!("{lat},{lng}")));
        params.push(("radius", radius.to_string()));
    }
    params
}

fn details_params(api_key: &str, place_id: &str) -> Params {
    vec![
        ("key", api_key.to_string()),
        ("place_id", place_id.to_string()),
        ("fields", DETAIL_FIELDS.join(",")),
    ]
}

/// Later pages repeat the first request plus the page token.
fn page_params(base: &[(&'static str, String)], token: Option<&str>) -> Params {
    let mut params = base.to_vec();
    if let Some(token) = token {
        params.push(("pagetoken", token.to_string()));
    }
    params
}

/// Non-2xx is an HTTP error carrying the body; a 2xx body must decode as `T`.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: String) -> Result<T, RequestError> {
    if !status.is_success() {
        return Err(RequestError::Http {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| RequestError::Malformed(e.to_string()))
}

/// Follow `next_page_token` until it runs out or `MAX_PAGES` is reached.
///
/// A failure on the first page fails the search. A failure on a later page
/// keeps what was already collected.
pub(crate) fn collect_pages<F>(
    page_token_delay: Duration,
    mut fetch_page: F,
) -> Result<Vec<PlaceResult>, RequestError>
where
    F: FnMut(Option<&str>) -> Result<SearchResponse, RequestError>,
{
    let mut results = Vec::new();
    let mut token: Option<String> = None;

    for page in 1..=MAX_PAGES {
        if token.is_some() {
            // The token only becomes valid a short while after it is issued.
            pause(page_token_delay);
        }

        let resp = fetch_page(token.as_deref()).and_then(|resp| {
            if resp.status == "OK" || resp.status == "ZERO_RESULTS" {
                Ok(resp)
            } else {
                Err(RequestError::from_status(&resp.status, resp.error_message))
            }
        });

        let resp = match resp {
            Ok(resp) => resp,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                log::warn!("Page {page} failed, keeping {} results: {e}", results.len());
                break;
            }
        };

        results.extend(resp.results);

        match resp.next_page_token {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => break,
        }
    }

    Ok(results)
}
