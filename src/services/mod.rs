pub mod archive;
pub mod binary;
pub mod config;
pub mod convert;
pub mod images;
pub mod rules;
pub mod xfl;
