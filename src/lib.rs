//! Supercell SC animation containers → Adobe Animate XFL projects (`.fla`).

pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::archive::{extract_project, pack_project};
pub use services::convert::{convert_container, sc_to_fla, LogProgress, Progress};
pub use types::errors::{ConvertError, ConvertResult};
