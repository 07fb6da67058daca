pub mod router;
pub mod selectors;
pub mod store;
