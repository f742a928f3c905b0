//! Fire-and-collect batches.
//!
//! A batch drives a set of independent calls concurrently and records one outcome per
//! call. A failure is data in the [`BatchReport`], never an early return: siblings keep
//! running and nothing already applied is rolled back.

use crate::errors::Error;
use crate::provisioner::CanonicalSection;
use crate::types::{ChecklistItemId, UserId};
use futures::future::join_all;
use std::fmt;
use std::future::Future;

/// What a batched call was meant to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    /// PATCH of the checklist item backing a canonical section
    PatchSection {
        section: CanonicalSection,
        item_id: ChecklistItemId,
    },
    /// POST linking a user to the project
    LinkMember { user_id: UserId },
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOperation::PatchSection { section, item_id } => {
                write!(f, "update '{}' (item {})", section.title(), item_id)
            }
            BatchOperation::LinkMember { user_id } => write!(f, "add member {user_id}"),
        }
    }
}

#[derive(Debug)]
pub struct OperationOutcome {
    pub operation: BatchOperation,
    pub result: Result<(), Error>,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in dispatch order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<OperationOutcome>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(OperationOutcome::is_success)
    }
}

/// Run every call concurrently and wait for all of them.
pub async fn run_batch<I, Fut>(calls: I) -> BatchReport
where
    I: IntoIterator<Item = (BatchOperation, Fut)>,
    Fut: Future<Output = Result<(), Error>>,
{
    let outcomes = join_all(calls.into_iter().map(|(operation, call)| async move {
        let result = call.await;
        if let Err(e) = &result {
            tracing::warn!(operation = %operation, error = %e, "Batched call failed");
        }
        OperationOutcome { operation, result }
    }))
    .await;

    BatchReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_failure_does_not_stop_siblings() {
        let ran = Arc::new(AtomicUsize::new(0));

        let calls = (1..=3).map(|user_id| {
            let ran = ran.clone();
            let call = async move {
                ran.fetch_add(1, Ordering::SeqCst);
                if user_id == 2 {
                    Err(Error::from_response(500, "boom"))
                } else {
                    Ok(())
                }
            };
            (BatchOperation::LinkMember { user_id }, call)
        });

        let report = run_batch(calls).await;

        assert_eq!(ran.load(Ordering::SeqCst), 3);
        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded(), 2);
        let failed: Vec<_> = report.failures().map(|o| o.operation).collect();
        assert_eq!(failed, vec![BatchOperation::LinkMember { user_id: 2 }]);
        assert!(!report.all_succeeded());
    }

    #[tokio::test]
    async fn test_calls_run_concurrently() {
        // the first call can only finish once the second has started
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let mut tx = Some(tx);
        let mut rx = Some(rx);

        let calls = (1..=2).map(|user_id| {
            let rx = if user_id == 1 { rx.take() } else { None };
            let tx = if user_id == 2 { tx.take() } else { None };
            let call = async move {
                if let Some(rx) = rx {
                    rx.await.map_err(|e| Error::Other(e.into()))?;
                }
                if let Some(tx) = tx {
                    let _ = tx.send(());
                }
                Ok::<(), Error>(())
            };
            (BatchOperation::LinkMember { user_id }, call)
        });

        let report = tokio::time::timeout(std::time::Duration::from_secs(1), run_batch(calls))
            .await
            .expect("batch deadlocked");
        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let report = run_batch(Vec::<(BatchOperation, std::future::Ready<Result<(), Error>>)>::new()).await;
        assert!(report.is_empty());
        assert!(report.all_succeeded());
    }

    #[test]
    fn test_operation_display() {
        let op = BatchOperation::PatchSection {
            section: CanonicalSection::PendingItems,
            item_id: 4,
        };
        assert_eq!(op.to_string(), "update 'Pendências' (item 4)");
    }
}
