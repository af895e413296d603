pub mod interfaces;
pub mod types;
