pub mod errors;
pub mod source;
pub mod xfl;
