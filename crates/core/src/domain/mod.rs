pub mod catalog;
pub mod sheets;
