use std::future::Future;
use std::time::Duration;

use futures_util::future::join_all;

use crate::retry::{with_retries, RetryPolicy};
use crate::{ItemOutcome, MessageRef, ScanEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub batch_size: usize,
    pub pause: Duration,
    pub retry: RetryPolicy,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: 8,
            pause: Duration::from_millis(250),
            retry: RetryPolicy::default(),
        }
    }
}

/// Anything that can be scheduled: outcomes are correlated by this id.
pub trait WorkItem {
    fn id(&self) -> &str;
}

impl WorkItem for MessageRef {
    fn id(&self) -> &str {
        &self.id
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ScanEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: ScanEvent) {}
}

/// Runs `unit` over `items` in contiguous groups of `batch_size`.
///
/// Items of one group run concurrently, each wrapped in [`with_retries`];
/// the next group starts only after the whole group settled and `pause`
/// elapsed. A failing item is recorded in its outcome and never stops the
/// run. Outcomes come back in input order.
pub async fn run_in_batches<I, T, E, F, Fut>(
    items: &[I],
    settings: &BatchSettings,
    sink: &dyn ProgressSink,
    unit: F,
) -> Vec<ItemOutcome<T, E>>
where
    I: WorkItem,
    F: Fn(&I) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let batch_size = settings.batch_size.max(1);
    let batch_count = items.len().div_ceil(batch_size);
    let retry = settings.retry;
    let unit = &unit;

    let mut outcomes = Vec::with_capacity(items.len());
    for (index, batch) in items.chunks(batch_size).enumerate() {
        sink.emit(ScanEvent::BatchStarted {
            index,
            size: batch.len(),
        });

        let pending = batch.iter().map(|item| async move {
            let result = with_retries(retry, || unit(item)).await;
            ItemOutcome {
                id: item.id().to_string(),
                result,
            }
        });
        let settled = join_all(pending).await;

        for outcome in &settled {
            sink.emit(ScanEvent::ItemFinished {
                id: outcome.id.clone(),
                ok: outcome.is_ok(),
            });
        }
        outcomes.extend(settled);
        sink.emit(ScanEvent::BatchFinished { index });

        if index + 1 < batch_count {
            tokio::time::sleep(settings.pause).await;
        }
    }
    outcomes
}
