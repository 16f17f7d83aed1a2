//! Stress run integration tests.
//!
//! The in-memory tests drive the full setup -> seed -> mutate -> verify
//! workflow against a fake replicated pair of schemas. The MySQL test needs
//! a live server and is ignored by default.

mod fake_cluster;
mod filter_events;
mod in_memory_run;
mod mysql_run;
