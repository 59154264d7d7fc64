use thiserror::Error;

#[derive(Debug, Error)]
#[error(
    "Project cannot be deleted while it has {pending_tasks} pending task(s); complete or remove them first"
)]
pub struct PendingTasksError {
    pub pending_tasks: u64,
}

/// Rule gating project deletion: a project still holding pending tasks
/// cannot be deleted.
#[derive(Clone, Copy, Default)]
pub struct ProjectDeletionPolicy;

impl ProjectDeletionPolicy {
    pub fn evaluate(&self, pending_tasks: u64) -> Result<(), PendingTasksError> {
        if pending_tasks > 0 {
            return Err(PendingTasksError { pending_tasks });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_projects_without_pending_tasks() {
        assert!(ProjectDeletionPolicy.evaluate(0).is_ok());
    }

    #[test]
    fn rejects_projects_with_pending_tasks() {
        let err = ProjectDeletionPolicy.evaluate(3).unwrap_err();
        assert_eq!(err.pending_tasks, 3);
        assert!(err.to_string().contains("3 pending task(s)"));
    }
}
