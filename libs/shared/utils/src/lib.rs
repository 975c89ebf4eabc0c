pub mod names;
pub mod pagination;
pub mod test_utils;
pub mod validate;

pub use pagination::page_window;
pub use validate::validate_input;
