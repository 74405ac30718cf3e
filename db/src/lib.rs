pub mod error;
pub mod filters;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod test_utils;
pub mod verdict;

pub use error::DbError;
pub use pool::{connect, connect_and_migrate};
