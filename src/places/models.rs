use serde::Deserialize;

// search response
//  ├── status
//  ├── error_message
//  ├── next_page_token
//  └── results[]
//       ├── place_id
//       ├── name
//       ├── formatted_address   (text search)
//       ├── vicinity            (nearby search)
//       ├── geometry
//       │    └── location
//       │         ├── lat
//       │         └── lng
//       ├── rating
//       └── types[]

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub status: String,
    pub error_message: Option<String>,
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub geometry: Option<Geometry>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub status: String,
    pub error_message: Option<String>,
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    pub formatted_address: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    /// Google Maps URL for the place.
    pub url: Option<String>,
}

impl PlaceResult {
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.location)
    }
}
