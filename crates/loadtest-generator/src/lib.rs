//! Statement generators for the sync-stress workload driver.
//!
//! A [`TableDataGenerator`] turns a random source into executable
//! [`sync_core::Statement`]s for one table: bulk inserts for seeding and
//! single randomized mutations for the transaction workload. The generator
//! itself holds no random state.
//!
//! # Example
//!
//! ```rust
//! use loadtest_generator::{MySQLTableDataGenerator, TableDataGenerator};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let generator = MySQLTableDataGenerator::new("source_db", "test_0");
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let seed = generator.bulk_insert(500, &mut rng);
//! let mutation = generator.random_mutation(0.2, 0.3, &mut rng);
//! assert_eq!(seed.placeholder_count(), seed.args.len());
//! assert!(!mutation.sql.is_empty());
//! ```

pub mod generator;
pub mod generators;
pub mod mysql;

// Re-exports for convenience
pub use generator::{choose_mutation, MutationKind, TableDataGenerator};
pub use mysql::{create_table_ddl, drop_table_ddl, qualified_name, MySQLTableDataGenerator};
