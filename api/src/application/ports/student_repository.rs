use async_trait::async_trait;

use crate::domain::users::Student;

/// Every mutation is a single atomic update of one column, so concurrent
/// hour logging and confirmation changes never overwrite each other.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_student(&self, id: i64) -> anyhow::Result<Option<Student>>;
    /// Adds `hours` to the stored total. `Ok(None)` when the student is gone.
    /// A negative amount or an overflowing total fails with `HoursError` and
    /// leaves the row unchanged.
    async fn add_hours(&self, id: i64, hours: i32) -> anyhow::Result<Option<Student>>;
    /// Sets only `confirmation_requested`. `Ok(None)` when the student is gone.
    async fn set_confirmation_requested(
        &self,
        id: i64,
        requested: bool,
    ) -> anyhow::Result<Option<Student>>;
    /// Students by `total_hours` descending, ties broken by id.
    async fn leaderboard(&self, limit: i64) -> anyhow::Result<Vec<Student>>;
    async fn pending_confirmations(&self) -> anyhow::Result<Vec<Student>>;
}
