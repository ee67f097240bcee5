mod client;
pub(crate) mod models;
mod request_error;

pub use client::{NearbyRequest, PlacesApi, PlacesClient, TextRequest, USER_AGENT};
pub use models::{PlaceDetails, PlaceResult};
pub use request_error::RequestError;
