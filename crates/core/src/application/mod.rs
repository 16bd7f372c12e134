pub mod batch_delete;
pub mod catalog_layout;
pub mod delete_procurement;
pub mod retry;
pub mod service;
