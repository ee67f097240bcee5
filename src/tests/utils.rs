use crate::app::App;
use crate::config::{AppConfig, Pacing};
use crate::crawler::PageFetcher;
use crate::places::{NearbyRequest, PlaceDetails, PlaceResult, PlacesApi, RequestError, TextRequest};
use crate::router::handle;
use astra::{Body, Response};
use http::Method;
use std::io::Read;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

/// Places API stand-in: one place per text query, id derived from the query.
#[derive(Default)]
pub struct FakePlaces {
    /// Text queries containing this fail with a quota error.
    pub fail_on: Option<String>,
}

impl PlacesApi for FakePlaces {
    fn nearby_search(
        &self,
        _api_key: &str,
        _req: &NearbyRequest,
    ) -> Result<Vec<PlaceResult>, RequestError> {
        Ok(vec![place("near-1", "Nearby Grill"), place("near-2", "Corner Cafe")])
    }

    fn text_search(
        &self,
        _api_key: &str,
        req: &TextRequest,
    ) -> Result<Vec<PlaceResult>, RequestError> {
        if let Some(bad) = &self.fail_on {
            if req.query.contains(bad.as_str()) {
                return Err(RequestError::QuotaExceeded("daily limit".into()));
            }
        }
        Ok(vec![place(&format!("t-{}", req.query), &req.query)])
    }

    fn place_details(&self, _api_key: &str, place_id: &str) -> Result<PlaceDetails, RequestError> {
        Ok(PlaceDetails {
            international_phone_number: Some("+359 2 555 0101".into()),
            website: Some(format!("{place_id}.example.bg")),
            url: Some(format!("https://maps.google.com/?q={place_id}")),
            ..PlaceDetails::default()
        })
    }
}

/// `FakePlaces` whose first details lookup waits until the test releases it.
pub struct GatedPlaces {
    inner: FakePlaces,
    gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
}

/// Test side of the gate: `entered` fires when the lookup is blocked,
/// sending on `release` lets it finish.
pub struct Gate {
    pub entered: Receiver<()>,
    pub release: Sender<()>,
}

impl GatedPlaces {
    pub fn new() -> (Self, Gate) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let places = Self {
            inner: FakePlaces::default(),
            gate: Mutex::new(Some((entered_tx, release_rx))),
        };
        let gate = Gate {
            entered: entered_rx,
            release: release_tx,
        };
        (places, gate)
    }
}

impl PlacesApi for GatedPlaces {
    fn nearby_search(
        &self,
        api_key: &str,
        req: &NearbyRequest,
    ) -> Result<Vec<PlaceResult>, RequestError> {
        self.inner.nearby_search(api_key, req)
    }

    fn text_search(
        &self,
        api_key: &str,
        req: &TextRequest,
    ) -> Result<Vec<PlaceResult>, RequestError> {
        self.inner.text_search(api_key, req)
    }

    fn place_details(&self, api_key: &str, place_id: &str) -> Result<PlaceDetails, RequestError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = gate {
            entered.send(()).unwrap();
            release.recv().unwrap();
        }
        self.inner.place_details(api_key, place_id)
    }
}

/// Every website has the same contact page.
pub struct FakeSite;

impl PageFetcher for FakeSite {
    fn fetch_html(&self, _url: &str) -> Result<Option<String>, RequestError> {
        Ok(Some(
            r#"<footer><a href="mailto:hello@example.bg">Contact</a></footer>"#.to_string(),
        ))
    }
}

pub fn place(id: &str, name: &str) -> PlaceResult {
    PlaceResult {
        place_id: Some(id.to_string()),
        name: Some(name.to_string()),
        formatted_address: Some("Sofia, Bulgaria".to_string()),
        ..PlaceResult::default()
    }
}

pub fn test_config(api_key: Option<&str>) -> AppConfig {
    AppConfig {
        api_key: api_key.map(str::to_string),
        pacing: Pacing::none(),
        ..AppConfig::default()
    }
}

/// App wired to fakes, with an API key configured.
pub fn test_app() -> App {
    app_with(FakePlaces::default(), Some("test-key"))
}

pub fn app_with(places: FakePlaces, api_key: Option<&str>) -> App {
    App::with_services(test_config(api_key), Box::new(places), Box::new(FakeSite))
}

pub fn gated_app() -> (App, Gate) {
    let (places, gate) = GatedPlaces::new();
    let app = App::with_services(
        test_config(Some("test-key")),
        Box::new(places),
        Box::new(FakeSite),
    );
    (app, gate)
}

pub fn get(app: &App, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::GET, uri, None, cookie)
}

pub fn post(app: &App, uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Response {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    send(app, Method::POST, uri, Some(body), cookie)
}

fn send(app: &App, method: Method, uri: &str, body: Option<String>, cookie: Option<&str>) -> Response {
    let mut builder = http::Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header("Cookie", c);
    }
    let body = body.map(Body::from).unwrap_or_else(Body::empty);
    let req = builder.body(body).unwrap();

    handle(req, app).unwrap_or_else(crate::responses::error_to_response)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

/// `lead_session=...` pair from a Set-Cookie header.
pub fn session_cookie(resp: &Response) -> String {
    resp.headers()
        .get("Set-Cookie")
        .expect("no Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Start a session and return its cookie.
pub fn start_session(app: &App) -> String {
    session_cookie(&get(app, "/", None))
}

pub fn export_csv(app: &App, cookie: &str) -> String {
    body_string(get(app, "/export.csv", Some(cookie)))
}
