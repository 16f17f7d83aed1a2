//! The per-table statement generator capability.

use rand::RngCore;
use sync_core::Statement;

/// Produces executable statements for one table.
///
/// Implementations are shared read-only across workers; all randomness comes
/// from the caller's random source so that no RNG state is shared.
pub trait TableDataGenerator: Send + Sync {
    /// Name of the table this generator writes to.
    fn table(&self) -> &str;

    /// Build one statement inserting `count` fresh rows.
    ///
    /// `count` must be at least 1.
    fn bulk_insert(&self, count: usize, rng: &mut dyn RngCore) -> Statement;

    /// Build one randomized mutation.
    ///
    /// With probability `delete_ratio` the statement deletes a row, with
    /// probability `insert_ratio` it inserts one, and otherwise it updates
    /// one. The ratios must be in `[0, 1]` and sum to at most 1.
    fn random_mutation(
        &self,
        delete_ratio: f64,
        insert_ratio: f64,
        rng: &mut dyn RngCore,
    ) -> Statement;
}

/// Kind of mutation chosen by [`choose_mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    Insert,
    Update,
}

/// Draw the mutation kind for one statement from the configured ratios.
pub fn choose_mutation(delete_ratio: f64, insert_ratio: f64, rng: &mut dyn RngCore) -> MutationKind {
    use rand::Rng;

    let p: f64 = rng.random();
    if p < delete_ratio {
        MutationKind::Delete
    } else if p < delete_ratio + insert_ratio {
        MutationKind::Insert
    } else {
        MutationKind::Update
    }
}
