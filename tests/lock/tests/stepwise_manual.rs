//! Manual stepping and cancellation lock tests.
//!
//! Proves:
//! 1. In manual mode each `trigger_step` releases exactly one observer call;
//!    after two triggers two calls have resolved and the third node is held
//! 2. `stop` releases the held node without reporting it; the run ends with
//!    `stopped=true`
//! 3. Triggers while nothing is paused are dropped, never queued
//! 4. A wall-clock timeout is layered on by calling `stop` from a timer task
//! 5. Dropping a run mid-flight frees the controller for the next `start`

use std::time::Duration;

use lock_tests::observers::Recorder;
use wayfinder_harness::worlds::AdjacencyWorld;
use wayfinder_harness::{
    ControllerConfig, RunPhase, RunStatus, StepwiseController, MANUAL_LEVEL,
};
use wayfinder_search::{LogPolicy, SearchPolicy, Termination};

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
// 1–2. Two triggers, then stop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_triggers_then_stop() {
    let controller = controller(MANUAL_LEVEL);
    let handle = controller.handle();
    let mut recorder = Recorder::default();
    let world = AdjacencyWorld::linear(10);

    let (report, ()) = tokio::join!(controller.start(&world, &mut recorder), async {
        // The root is held before the observer sees it.
        handle.wait_for_phase(RunPhase::Paused).await;
        assert_eq!(handle.step_count(), 0);

        handle.trigger_step();
        handle.wait_for_phase(RunPhase::Paused).await;
        assert_eq!(handle.step_count(), 1);

        handle.trigger_step();
        handle.wait_for_phase(RunPhase::Paused).await;
        // Steps 1 and 2 have resolved; the third node is held.
        assert_eq!(handle.step_count(), 2);
        assert_eq!(handle.phase(), RunPhase::Paused);

        handle.stop();
    });

    let report = report.expect("run starts");
    assert_eq!(report.status, RunStatus::Stopped);
    assert!(report.outcome.stopped);
    assert!(!report.outcome.success);
    assert_eq!(report.outcome.termination, Termination::Stopped);
    assert_eq!(report.steps, 2);
    // The held node was popped but never reported.
    assert_eq!(report.outcome.nodes_visited, 3);
    assert_eq!(recorder.labels(), vec!["n0", "n1"]);
    assert_eq!(recorder.completions, vec![RunStatus::Stopped]);
    assert_eq!(handle.phase(), RunPhase::Stopped);
}

// ---------------------------------------------------------------------------
// 3. No queued triggers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extra_triggers_are_dropped() {
    let controller = controller(MANUAL_LEVEL);
    let handle = controller.handle();
    let mut recorder = Recorder::default();
    let world = AdjacencyWorld::linear(10);

    let (report, ()) = tokio::join!(controller.start(&world, &mut recorder), async {
        handle.wait_for_phase(RunPhase::Paused).await;
        handle.trigger_step();
        handle.trigger_step();
        handle.trigger_step();
        handle.wait_for_phase(RunPhase::Paused).await;
        assert_eq!(handle.step_count(), 1);
        handle.stop();
    });

    assert_eq!(report.expect("run starts").steps, 1);
    assert_eq!(recorder.labels(), vec!["n0"]);
}

#[tokio::test]
async fn manual_run_reaches_goal_one_trigger_at_a_time() {
    let controller = controller(MANUAL_LEVEL);
    let handle = controller.handle();
    let mut recorder = Recorder::default();
    let world = AdjacencyWorld::linear(3);

    let (report, ()) = tokio::join!(controller.start(&world, &mut recorder), async {
        for _ in 0..3 {
            handle.wait_for_phase(RunPhase::Paused).await;
            handle.trigger_step();
        }
    });

    let report = report.expect("run starts");
    assert_eq!(report.status, RunStatus::Completed);
    assert!(report.outcome.success);
    assert_eq!(recorder.labels(), vec!["n0", "n1", "n2"]);
}

// ---------------------------------------------------------------------------
// 4. External timeout
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn timer_task_stops_a_slow_run() {
    // Level 0 waits one second after every step.
    let controller = controller(0);
    let handle = controller.handle();
    let mut recorder = Recorder::default();

    let timer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        handle.stop();
    });
    let report = controller
        .start(&AdjacencyWorld::linear(20), &mut recorder)
        .await
        .expect("run starts");
    timer.await.expect("timer task finished");

    assert_eq!(report.status, RunStatus::Stopped);
    // Steps at t=0s, 1s and 2s; the stop lands during the third delay.
    assert_eq!(report.steps, 3);
    assert_eq!(recorder.completions.len(), 1);
}

// ---------------------------------------------------------------------------
// 5. Dropped runs
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn dropped_run_frees_the_controller() {
    let controller = controller(0);
    let handle = controller.handle();
    let mut recorder = Recorder::default();

    let dropped = tokio::time::timeout(
        Duration::from_millis(1500),
        controller.start(&AdjacencyWorld::linear(20), &mut recorder),
    )
    .await;
    assert!(dropped.is_err(), "run should still be pacing at 1.5s");
    assert!(!handle.is_running());
    assert_eq!(handle.phase(), RunPhase::Stopped);
    assert!(recorder.completions.is_empty());

    handle.set_speed(5).expect("known speed level");
    let mut next = Recorder::default();
    let report = controller
        .start(&AdjacencyWorld::linear(3), &mut next)
        .await
        .expect("controller is free again");
    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(next.labels(), vec!["n0", "n1", "n2"]);
}

#[tokio::test]
async fn dropped_manual_run_releases_its_pause() {
    let controller = controller(MANUAL_LEVEL);
    let handle = controller.handle();
    let mut recorder = Recorder::default();
    let world = AdjacencyWorld::linear(5);

    tokio::select! {
        _ = controller.start(&world, &mut recorder) => panic!("manual run finished untriggered"),
        () = handle.wait_for_phase(RunPhase::Paused) => {}
    }
    assert!(!handle.is_running());
    assert_eq!(handle.phase(), RunPhase::Stopped);
    // Nothing is held, so a trigger has no effect.
    handle.trigger_step();
    assert_eq!(handle.phase(), RunPhase::Stopped);

    let mut next = Recorder::default();
    let (report, ()) = tokio::join!(controller.start(&world, &mut next), async {
        handle.wait_for_phase(RunPhase::Paused).await;
        handle.stop();
    });
    assert_eq!(report.expect("controller is free again").steps, 0);
}
