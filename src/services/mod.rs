pub mod paginator;
pub mod query_translator;

pub use paginator::{fetch_page, list_sets};
pub use query_translator::{translate, FALLBACK_QUERY};
