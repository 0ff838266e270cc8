//! Stepwise controller: paces a [`GraphSearchEngine`] one node at a time.
//!
//! # Lifecycle
//!
//! ```text
//! Idle → Running → (Paused)* → Running → Completed | Stopped
//! ```
//!
//! The controller owns the engine and runs `start`; a cloneable
//! [`ControllerHandle`] drives it from elsewhere (`stop`, `set_speed`,
//! `trigger_step`). All traversal state stays inside the one future running
//! `start`; the handle only touches the small [`RunState`] behind a mutex and
//! never holds the lock across an await.
//!
//! In manual mode every node is held before it reaches the observer, so each
//! `trigger_step` releases exactly one observer call. Automatic mode reports
//! first and then sleeps for the configured delay.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, trace};
use wayfinder_kernel::SearchState;
use wayfinder_search::{
    GraphSearchEngine, LogDomain, LogPolicy, SearchError, SearchPolicy, Severity, Visit,
    VisitControl, VisitHook,
};

use crate::contract::{RunReport, RunStatus, StepEvent, StepObserver};
use crate::policy::{ControllerConfig, Pacing};

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("a run is already in progress")]
    AlreadyRunning,
    #[error("unknown speed level {level}")]
    UnknownSpeedLevel { level: u8 },
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Observable controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    /// Waiting for `trigger_step` in manual mode.
    Paused,
    Completed,
    Stopped,
}

struct RunState {
    running: bool,
    stop_requested: bool,
    pacing: Pacing,
    pending_resume: Option<oneshot::Sender<()>>,
    steps: u64,
}

impl RunState {
    /// Release a manual pause, if one is pending.
    fn resume(&mut self) -> bool {
        match self.pending_resume.take() {
            // The receiver may already be gone if the run ended.
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }
}

struct Shared {
    state: Mutex<RunState>,
    phase: watch::Sender<RunPhase>,
    log: LogPolicy,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, phase: RunPhase) {
        self.phase.send_replace(phase);
    }

    fn enabled(&self, severity: Severity) -> bool {
        self.log.enabled(LogDomain::Controller, severity)
    }
}

/// Marks a run in flight until it is finished or dropped.
///
/// A `start` future dropped mid-run, for example by a timeout, releases the
/// controller and publishes `Stopped`.
struct RunGuard<'a> {
    shared: &'a Shared,
    finished: bool,
}

impl RunGuard<'_> {
    fn finish(mut self, phase: RunPhase) {
        self.release(phase);
        self.finished = true;
    }

    fn release(&self, phase: RunPhase) {
        let mut state = self.shared.lock();
        state.running = false;
        state.pending_resume = None;
        self.shared.set_phase(phase);
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.release(RunPhase::Stopped);
        if self.shared.enabled(Severity::Debug) {
            debug!(target: "wayfinder::controller", "run dropped before finishing");
        }
    }
}

/// Drives one [`GraphSearchEngine`] under pacing control.
pub struct StepwiseController<S: SearchState> {
    engine: GraphSearchEngine<S>,
    shared: Arc<Shared>,
}

impl<S: SearchState> StepwiseController<S> {
    /// Build the engine from `policy` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Search`] for an invalid policy and
    /// [`ControllerError::UnknownSpeedLevel`] for an out-of-range speed.
    pub fn new(policy: SearchPolicy, config: ControllerConfig) -> Result<Self, ControllerError> {
        let engine = GraphSearchEngine::new(policy)?.with_log_policy(config.log.clone());
        Self::from_engine(engine, config)
    }

    /// Wrap an already configured engine (e.g. one with a successor order).
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownSpeedLevel`] for an out-of-range
    /// speed.
    pub fn from_engine(
        engine: GraphSearchEngine<S>,
        config: ControllerConfig,
    ) -> Result<Self, ControllerError> {
        let pacing = Pacing::for_level(config.speed_level)?;
        let (phase, _) = watch::channel(RunPhase::Idle);
        let shared = Arc::new(Shared {
            state: Mutex::new(RunState {
                running: false,
                stop_requested: false,
                pacing,
                pending_resume: None,
                steps: 0,
            }),
            phase,
            log: config.log,
        });
        Ok(Self { engine, shared })
    }

    /// A handle for controlling runs of this controller.
    #[must_use]
    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &GraphSearchEngine<S> {
        &self.engine
    }

    /// Run a search from `start`, reporting each visited node to `observer`.
    ///
    /// Speed settings carry over between runs; the stop flag and step count
    /// do not. `observer.on_complete` is awaited exactly once, before the
    /// phase becomes `Completed` or `Stopped`. Dropping the returned future
    /// ends the run without calling `on_complete`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::AlreadyRunning`] if another run of this
    /// controller has not finished.
    pub async fn start(
        &self,
        start: &S,
        observer: &mut dyn StepObserver<S>,
    ) -> Result<RunReport<S>, ControllerError> {
        {
            let mut state = self.shared.lock();
            if state.running {
                return Err(ControllerError::AlreadyRunning);
            }
            state.running = true;
            state.stop_requested = false;
            state.pending_resume = None;
            state.steps = 0;
            self.shared.set_phase(RunPhase::Running);
        }
        let guard = RunGuard {
            shared: &self.shared,
            finished: false,
        };
        if self.shared.enabled(Severity::Info) {
            info!(target: "wayfinder::controller", start = %start.state_key(), "run started");
        }

        let mut pacer = Pacer {
            shared: &self.shared,
            observer: &mut *observer,
        };
        let outcome = self.engine.solve(start, Some(&mut pacer)).await;

        let steps = self.shared.lock().steps;
        let status = if outcome.stopped {
            RunStatus::Stopped
        } else {
            RunStatus::Completed
        };
        let report = RunReport {
            status,
            outcome,
            steps,
        };
        observer.on_complete(&report).await;

        guard.finish(match status {
            RunStatus::Completed => RunPhase::Completed,
            RunStatus::Stopped => RunPhase::Stopped,
        });
        if self.shared.enabled(Severity::Info) {
            info!(
                target: "wayfinder::controller",
                status = ?status,
                steps,
                success = report.outcome.success,
                "run finished"
            );
        }
        Ok(report)
    }
}

/// Cloneable remote control for a [`StepwiseController`].
#[derive(Clone)]
pub struct ControllerHandle {
    shared: Arc<Shared>,
}

impl ControllerHandle {
    /// Request cancellation at the next step boundary.
    ///
    /// Releases a pending manual pause so the run can observe the request
    /// without another trigger. No-op while idle.
    pub fn stop(&self) {
        let mut state = self.shared.lock();
        if !state.running {
            return;
        }
        state.stop_requested = true;
        let released = state.resume();
        drop(state);
        if self.shared.enabled(Severity::Debug) {
            debug!(target: "wayfinder::controller", released, "stop requested");
        }
    }

    /// Change pacing. [`MANUAL_LEVEL`](crate::policy::MANUAL_LEVEL) enters
    /// manual mode; any other level leaves it and releases a pending pause.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownSpeedLevel`] for an out-of-range
    /// level; the current pacing is unchanged.
    pub fn set_speed(&self, level: u8) -> Result<(), ControllerError> {
        let pacing = Pacing::for_level(level)?;
        let mut state = self.shared.lock();
        state.pacing = pacing;
        let released = !pacing.is_manual() && state.resume();
        if released {
            self.shared.set_phase(RunPhase::Running);
        }
        drop(state);
        if self.shared.enabled(Severity::Debug) {
            debug!(target: "wayfinder::controller", level, released, "speed changed");
        }
        Ok(())
    }

    /// Release the pending manual pause. No-op when nothing is paused; steps
    /// are never queued.
    pub fn trigger_step(&self) {
        let mut state = self.shared.lock();
        if state.resume() {
            self.shared.set_phase(RunPhase::Running);
        }
    }

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        *self.shared.phase.borrow()
    }

    /// Steps taken by the current (or last) run.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.shared.lock().steps
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// Wait until the controller reaches `phase`.
    pub async fn wait_for_phase(&self, phase: RunPhase) {
        let mut rx = self.shared.phase.subscribe();
        // The sender lives as long as `shared`, which this handle keeps alive.
        let _ = rx.wait_for(|current| *current == phase).await;
    }
}

/// Engine hook that reports to the observer and applies pacing.
struct Pacer<'a, S: SearchState> {
    shared: &'a Shared,
    observer: &'a mut dyn StepObserver<S>,
}

/// What happens before a node reaches the observer.
enum Gate {
    Open,
    Held(oneshot::Receiver<()>),
    Stop,
}

impl<S: SearchState> Pacer<'_, S> {
    fn stop_requested(&self) -> bool {
        self.shared.lock().stop_requested
    }

    fn begin_step(&self) -> u64 {
        let mut state = self.shared.lock();
        state.steps += 1;
        state.steps
    }

    /// Manual pacing holds the node until `trigger_step`.
    fn gate(&self) -> Gate {
        let mut state = self.shared.lock();
        if state.stop_requested {
            return Gate::Stop;
        }
        match state.pacing {
            Pacing::Automatic(_) => Gate::Open,
            Pacing::Manual => {
                let (tx, rx) = oneshot::channel();
                state.pending_resume = Some(tx);
                self.shared.set_phase(RunPhase::Paused);
                Gate::Held(rx)
            }
        }
    }

    /// Delay after a reported step. `None` means stop now.
    fn delay_after_step(&self) -> Option<Duration> {
        let state = self.shared.lock();
        if state.stop_requested {
            return None;
        }
        match state.pacing {
            Pacing::Automatic(delay) => Some(delay),
            Pacing::Manual => Some(Duration::ZERO),
        }
    }
}

#[async_trait]
impl<S: SearchState> VisitHook<S> for Pacer<'_, S> {
    async fn on_visit(&mut self, visit: Visit<'_, S>) -> VisitControl {
        match self.gate() {
            Gate::Open => {}
            Gate::Stop => return VisitControl::Stop,
            Gate::Held(rx) => {
                // Dropped sender means the run is being torn down.
                let _ = rx.await;
                if self.stop_requested() {
                    return VisitControl::Stop;
                }
            }
        }

        let index = self.begin_step();
        if self.shared.enabled(Severity::Trace) {
            trace!(
                target: "wayfinder::controller",
                step = index,
                depth = visit.depth,
                frontier = visit.frontier_len,
                "step"
            );
        }

        let event = StepEvent {
            index,
            state: visit.state,
            depth: visit.depth,
            frontier_len: visit.frontier_len,
        };
        if self.observer.on_step(event).await == VisitControl::Stop {
            if self.shared.enabled(Severity::Debug) {
                debug!(target: "wayfinder::controller", step = index, "observer stopped the run");
            }
            return VisitControl::Stop;
        }

        let Some(delay) = self.delay_after_step() else {
            return VisitControl::Stop;
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.stop_requested() {
            VisitControl::Stop
        } else {
            VisitControl::Continue
        }
    }
}
