mod emails;
mod fetcher;

pub use emails::crawl_site;
pub use fetcher::{HttpFetcher, PageFetcher};
