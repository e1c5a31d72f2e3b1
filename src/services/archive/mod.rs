pub mod eocd;
pub mod extract;
pub mod pack;
pub mod types;

pub use extract::extract_project;
pub use pack::pack_project;
pub use types::*;

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
