pub mod autofill;
pub mod candidate;
pub mod delete_plan;
pub mod layout;
pub mod matcher;
pub mod recap;
pub mod styling;
pub mod title;
