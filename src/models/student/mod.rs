pub mod data;
pub mod filter;
pub mod types;

pub use types::{Student, StudentStatus};
