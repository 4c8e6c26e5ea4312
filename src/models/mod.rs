pub mod filter;
pub mod search;
pub mod validation;

pub use filter::*;
pub use search::*;
pub use validation::{validate_page, validate_strict, ValidationError, Validator};
