use std::cell::Cell;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use scanner_engine::{
    run_in_batches, BatchSettings, MessageRef, NullProgressSink, ProgressSink, RetryPolicy,
    ScanEvent,
};
use tokio::time::Instant;

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<ScanEvent>>>,
}

impl TestSink {
    fn take(&self) -> Vec<ScanEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: ScanEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn assert_close(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(20),
        "elapsed {actual:?}, expected about {expected:?}"
    );
}

fn messages(count: usize) -> Vec<MessageRef> {
    (0..count)
        .map(|i| MessageRef::new(format!("m{i}"), format!("t{i}")))
        .collect()
}

fn settings(batch_size: usize) -> BatchSettings {
    BatchSettings {
        batch_size,
        pause: Duration::from_millis(250),
        retry: RetryPolicy {
            max_attempts: 4,
            initial_delay: Duration::from_millis(10),
        },
    }
}

#[tokio::test(start_paused = true)]
async fn twenty_items_run_as_three_groups_with_pauses_between() {
    let items = messages(20);
    let sink = TestSink::default();
    let start = Instant::now();

    let outcomes = run_in_batches(&items, &settings(8), &sink, |m: &MessageRef| {
        let id = m.id.clone();
        async move { Ok::<_, String>(id) }
    })
    .await;

    assert_eq!(outcomes.len(), 20);
    assert!(start.elapsed() >= Duration::from_millis(500));

    let sizes: Vec<usize> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            ScanEvent::BatchStarted { size, .. } => Some(size),
            _ => None,
        })
        .collect();
    assert_eq!(sizes, vec![8, 8, 4]);
}

#[tokio::test(start_paused = true)]
async fn no_pause_after_final_group() {
    let items = messages(20);
    let start = Instant::now();

    run_in_batches(&items, &settings(8), &NullProgressSink, |_m: &MessageRef| async {
        Ok::<_, String>(())
    })
    .await;

    assert_close(start.elapsed(), Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn outcomes_keep_input_order_and_ids() {
    let items = messages(5);
    let outcomes = run_in_batches(&items, &settings(2), &NullProgressSink, |m: &MessageRef| {
        // Later items finish first within a group.
        let delay = Duration::from_millis(100 - m.id[1..].parse::<u64>().unwrap() * 10);
        let id = m.id.clone();
        async move {
            tokio::time::sleep(delay).await;
            Ok::<_, String>(id.to_uppercase())
        }
    })
    .await;

    let ids: Vec<_> = outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["m0", "m1", "m2", "m3", "m4"]);
    assert_eq!(outcomes[3].result, Ok("M3".to_string()));
}

#[tokio::test(start_paused = true)]
async fn items_within_a_group_run_concurrently() {
    let items = messages(8);
    let start = Instant::now();

    run_in_batches(&items, &settings(8), &NullProgressSink, |_m: &MessageRef| async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok::<_, String>(())
    })
    .await;

    assert_close(start.elapsed(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn permanent_failure_is_isolated() {
    let items = messages(6);
    let bad_calls = Cell::new(0u32);

    let outcomes = run_in_batches(&items, &settings(8), &NullProgressSink, |m: &MessageRef| {
        let failing = m.id == "m2";
        if failing {
            bad_calls.set(bad_calls.get() + 1);
        }
        let attempt = bad_calls.get();
        async move {
            if failing {
                Err(format!("attempt {attempt}"))
            } else {
                Ok(())
            }
        }
    })
    .await;

    assert_eq!(outcomes.len(), 6);
    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 5);
    assert_eq!(outcomes[2].id, "m2");
    assert_eq!(outcomes[2].result, Err("attempt 4".to_string()));
    assert_eq!(bad_calls.get(), 4);
}

#[tokio::test(start_paused = true)]
async fn empty_input_does_nothing() {
    let sink = TestSink::default();
    let outcomes = run_in_batches(&[] as &[MessageRef], &settings(8), &sink, |_m: &MessageRef| async {
        Ok::<_, String>(())
    })
    .await;

    assert!(outcomes.is_empty());
    assert!(sink.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn zero_batch_size_is_treated_as_one() {
    let items = messages(3);
    let sink = TestSink::default();

    let outcomes = run_in_batches(&items, &settings(0), &sink, |_m: &MessageRef| async {
        Ok::<_, String>(())
    })
    .await;

    assert_eq!(outcomes.len(), 3);
    let groups = sink
        .take()
        .into_iter()
        .filter(|e| matches!(e, ScanEvent::BatchFinished { .. }))
        .count();
    assert_eq!(groups, 3);
}
