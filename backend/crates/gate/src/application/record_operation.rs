//! Record Operation Use Case

use std::sync::Arc;

use crate::domain::opt_log::OptLog;
use crate::domain::repository::OptLogRepository;

/// Record Operation Use Case
///
/// A log sink failure never changes the outcome of the request being logged.
pub struct RecordOperationUseCase<L>
where
    L: OptLogRepository,
{
    opt_log_repo: Arc<L>,
}

impl<L> RecordOperationUseCase<L>
where
    L: OptLogRepository,
{
    pub fn new(opt_log_repo: Arc<L>) -> Self {
        Self { opt_log_repo }
    }

    pub async fn execute(&self, log: OptLog) {
        if let Err(e) = self.opt_log_repo.save(&log).await {
            tracing::warn!(
                error = %e,
                operation = %log.operation,
                path = %log.path,
                "Failed to record operation log"
            );
        }
    }
}
