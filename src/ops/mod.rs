pub mod sort;
pub mod store;
