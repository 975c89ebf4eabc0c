pub mod collections;
pub mod error;
