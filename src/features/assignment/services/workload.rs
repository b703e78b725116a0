use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::modules::store::ComplaintStore;

/// Live count of faculty members' pending complaints (submitted or in progress).
///
/// Always read from the store; nothing is cached.
#[derive(Clone)]
pub struct WorkloadCalculator {
    complaints: Arc<dyn ComplaintStore>,
}

impl WorkloadCalculator {
    pub fn new(complaints: Arc<dyn ComplaintStore>) -> Self {
        Self { complaints }
    }

    /// Workloads for several faculty with a single grouped query.
    /// Every requested id is present in the result, zero when idle.
    pub async fn compute_many(&self, faculty_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        let counts = self.complaints.count_active_by_assignee(faculty_ids).await?;

        Ok(faculty_ids
            .iter()
            .map(|id| (*id, counts.get(id).copied().unwrap_or(0)))
            .collect())
    }
}
