pub mod connection;
pub mod error;
pub mod pagination;
pub mod repositories;
pub mod rows;
pub mod schema;

pub use connection::{Database, DbConnection, DbPool};
pub use error::{DbError, DbResult};
pub use pagination::{paginate, PageRequest};
