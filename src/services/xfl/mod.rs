//! XFL project writer: document graph → project directory.

pub mod writer;
pub mod xml;

pub use writer::write_document;

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
