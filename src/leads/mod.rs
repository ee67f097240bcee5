pub mod enrich;
pub mod query;
pub mod record;
pub mod search;
pub mod table;

pub use enrich::{crawl_emails, lookup_details, RowUpdate};
pub use query::{build_batch_queries, parse_subregions};
pub use record::{CrmEdit, LeadRecord};
pub use search::{run_batch, search_nearby, search_text};
pub use table::{Page, ResultTable};
