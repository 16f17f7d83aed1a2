//! MySQL implementation of the sync-core executor traits.
//!
//! One [`MySQLExecutor`] wraps a `mysql_async` connection pool for a single
//! schema. Standalone statements borrow a pooled connection for the duration
//! of the call; transactions hold one connection until commit or rollback.

mod client;
mod executor;
pub mod value;

pub use client::{mask_connection_password, new_mysql_pool};
pub use executor::{MySQLExecutor, MySQLTransaction};
