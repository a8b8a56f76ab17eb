pub mod catalog;
pub mod holdings;
