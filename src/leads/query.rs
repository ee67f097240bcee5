// Batch queries: one text search per subregion of a city.

/// Sofia districts, used to prefill the batch form.
pub const DEFAULT_CITY: &str = "Sofia";
pub const DEFAULT_SUBREGIONS: &[&str] = &[
    "Sredets",
    "Krasno Selo",
    "Vazrazhdane",
    "Oborishte",
    "Serdika",
    "Poduene",
    "Slatina",
    "Lyulin",
    "Mladost",
    "Lozenets",
    "Kremikovtsi",
    "Nadezhda",
    "Ilinden",
    "Vrabnitsa",
    "Ovcha Koupel",
    "Studentski grad",
    "Izgrev",
    "Bankya",
    "Pancharevo",
    "Vitosha",
    "Krasna Polyana",
    "Iskar",
    "Novi Iskar",
    "Dragalevtsi",
];

#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub city: String,
    pub subregion: String,
    pub text: String,
}

impl QueryDescriptor {
    /// Label stored in `search_origin` for rows this query finds.
    pub fn origin(&self) -> String {
        format!("{} > {}", self.city, self.subregion)
    }
}

/// One subregion per non-blank line.
pub fn parse_subregions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"<keyword> near <subregion>, <city>"` for each subregion.
/// A blank city or an empty list gives no queries.
pub fn build_batch_queries<S: AsRef<str>>(
    keyword: &str,
    city: &str,
    subregions: &[S],
) -> Vec<QueryDescriptor> {
    let city = city.trim();
    if city.is_empty() {
        return Vec::new();
    }
    let keyword = keyword.trim();

    subregions
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|sub| QueryDescriptor {
            city: city.to_string(),
            subregion: sub.to_string(),
            text: format!("{keyword} near {sub}, {city}").trim().to_string(),
        })
        .collect()
}
