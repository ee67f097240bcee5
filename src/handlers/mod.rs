pub mod enrich;
pub mod export;
pub mod leads;
pub mod search;
