use crate::places::{PlaceDetails, PlaceResult};

/// Export column order. Everything in the table is exported.
pub const COLUMNS: [&str; 18] = [
    "place_id",
    "name",
    "address",
    "lat",
    "lng",
    "rating",
    "types",
    "phone",
    "website",
    "google_maps_url",
    "status",
    "contact_name",
    "email",
    "owner",
    "deal_value",
    "last_contacted",
    "notes",
    "search_origin",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadRecord {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub types: String,

    // Filled by details enrichment
    pub phone: String,
    pub website: String,
    pub google_maps_url: String,

    // CRM columns, edited by hand
    pub status: String,
    pub contact_name: String,
    pub email: String,
    pub owner: String,
    pub deal_value: String,
    pub last_contacted: String,
    pub notes: String,

    pub search_origin: String,
}

/// Hand-edited fields of one row.
#[derive(Debug, Clone, Default)]
pub struct CrmEdit {
    pub status: String,
    pub contact_name: String,
    pub email: String,
    pub owner: String,
    pub deal_value: String,
    pub last_contacted: String,
    pub notes: String,
}

impl LeadRecord {
    /// Build a row from a search hit. Hits without a place id are unusable.
    pub fn from_place(place: &PlaceResult, origin: &str) -> Option<Self> {
        let place_id = place.place_id.as_deref().filter(|id| !id.is_empty())?;
        let location = place.location();

        Some(Self {
            place_id: place_id.to_string(),
            name: place.name.clone().unwrap_or_default(),
            address: place
                .formatted_address
                .clone()
                .or_else(|| place.vicinity.clone())
                .unwrap_or_default(),
            lat: location.map(|l| l.lat),
            lng: location.map(|l| l.lng),
            rating: place.rating,
            types: place.types.join(","),
            search_origin: origin.to_string(),
            ..Self::default()
        })
    }

    pub fn from_places(places: &[PlaceResult], origin: &str) -> Vec<Self> {
        places
            .iter()
            .filter_map(|p| Self::from_place(p, origin))
            .collect()
    }

    pub fn apply_details(&mut self, details: &PlaceDetails) {
        if let Some(addr) = details.formatted_address.as_ref() {
            self.address = addr.clone();
        }
        self.phone = details.international_phone_number.clone().unwrap_or_default();
        self.website = details.website.clone().unwrap_or_default();
        self.google_maps_url = details.url.clone().unwrap_or_default();
    }

    pub fn apply_edit(&mut self, edit: CrmEdit) {
        self.status = edit.status;
        self.contact_name = edit.contact_name;
        self.email = edit.email;
        self.owner = edit.owner;
        self.deal_value = edit.deal_value;
        self.last_contacted = edit.last_contacted;
        self.notes = edit.notes;
    }

    /// One CSV/XLSX row, in `COLUMNS` order.
    pub fn to_row(&self) -> [String; 18] {
        let num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();

        [
            self.place_id.clone(),
            self.name.clone(),
            self.address.clone(),
            num(self.lat),
            num(self.lng),
            num(self.rating),
            self.types.clone(),
            self.phone.clone(),
            self.website.clone(),
            self.google_maps_url.clone(),
            self.status.clone(),
            self.contact_name.clone(),
            self.email.clone(),
            self.owner.clone(),
            self.deal_value.clone(),
            self.last_contacted.clone(),
            self.notes.clone(),
            self.search_origin.clone(),
        ]
    }
}
