//! Stepwise controller ordering lock tests.
//!
//! Proves:
//! 1. In automatic mode with zero delay, a 5-node linear graph produces
//!    exactly 5 observer calls in traversal order, then one completion
//! 2. A slow observer holds back the traversal: step `n + 1` never starts
//!    before step `n` resolves
//! 3. Automatic delays pace the run on the tokio clock

use std::time::Duration;

use async_trait::async_trait;
use lock_tests::observers::Recorder;
use tokio::time::Instant;
use wayfinder_harness::worlds::AdjacencyWorld;
use wayfinder_harness::{
    ControllerConfig, RunPhase, RunStatus, StepEvent, StepObserver, StepwiseController,
    SPEED_DELAYS_MS,
};
use wayfinder_search::{LogPolicy, SearchPolicy, VisitControl};

fn controller(speed_level: u8) -> StepwiseController<AdjacencyWorld> {
    StepwiseController::new(
        SearchPolicy::default(),
        ControllerConfig {
            speed_level,
            log: LogPolicy::quiet(),
        },
    )
    .expect("valid controller config")
}

// ---------------------------------------------------------------------------
// 1. Five steps, one completion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn linear_five_reports_five_steps_then_completes() {
    let controller = controller(5);
    let handle = controller.handle();
    let mut recorder = Recorder::default();

    let report = controller
        .start(&AdjacencyWorld::linear(5), &mut recorder)
        .await
        .expect("run starts");

    assert_eq!(
        recorder.steps,
        vec![
            (1, "n0".to_string()),
            (2, "n1".to_string()),
            (3, "n2".to_string()),
            (4, "n3".to_string()),
            (5, "n4".to_string()),
        ]
    );
    assert_eq!(recorder.completions, vec![RunStatus::Completed]);
    assert_eq!(recorder.steps_at_completion, Some(5));
    assert_eq!(report.steps, 5);
    assert!(report.outcome.success);
    assert!(!report.outcome.stopped);
    assert_eq!(report.outcome.path_len(), 4);
    assert_eq!(handle.phase(), RunPhase::Completed);
    assert_eq!(handle.step_count(), 5);
}

#[tokio::test]
async fn controller_is_reusable_after_completion() {
    let controller = controller(5);
    for _ in 0..2 {
        let mut recorder = Recorder::default();
        let report = controller
            .start(&AdjacencyWorld::linear(3), &mut recorder)
            .await
            .expect("run starts");
        assert_eq!(report.steps, 3);
        assert_eq!(recorder.completions.len(), 1);
    }
}

// ---------------------------------------------------------------------------
// 2. Observer is a suspension point
// ---------------------------------------------------------------------------

/// Sleeps inside every step and records when each step began and ended.
#[derive(Default)]
struct Slow {
    spans: Vec<(u64, Instant, Instant)>,
}

#[async_trait]
impl StepObserver<AdjacencyWorld> for Slow {
    async fn on_step(&mut self, event: StepEvent<'_, AdjacencyWorld>) -> VisitControl {
        let began = Instant::now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.spans.push((event.index, began, Instant::now()));
        VisitControl::Continue
    }
}

#[tokio::test(start_paused = true)]
async fn slow_observer_serializes_steps() {
    let controller = controller(5);
    let mut slow = Slow::default();
    let report = controller
        .start(&AdjacencyWorld::linear(5), &mut slow)
        .await
        .expect("run starts");

    let order: Vec<u64> = slow.spans.iter().map(|(index, _, _)| *index).collect();
    assert_eq!(order, vec![1, 2, 3, 4, 5]);
    for pair in slow.spans.windows(2) {
        let (_, _, ended) = pair[0];
        let (_, next_began, _) = pair[1];
        assert!(next_began >= ended, "step {} began early", pair[1].0);
    }
    assert_eq!(report.status, RunStatus::Completed);
}

// ---------------------------------------------------------------------------
// 3. Delay table pacing
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn automatic_delay_paces_each_step() {
    let level = 3;
    let controller = controller(level);
    let mut recorder = Recorder::default();
    let started = Instant::now();

    controller
        .start(&AdjacencyWorld::linear(4), &mut recorder)
        .await
        .expect("run starts");

    // One delay after each of the four steps.
    let per_step = Duration::from_millis(SPEED_DELAYS_MS[usize::from(level)]);
    let elapsed = started.elapsed();
    assert!(elapsed >= per_step * 4, "{elapsed:?}");
    assert!(elapsed < per_step * 5, "{elapsed:?}");
}
