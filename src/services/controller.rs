//! Prediction Controller
//!
//! Owns the session state (predictions, phase, error, mode flags) and drives
//! fetch cycles from the initial load, manual retry, mode toggle and the
//! polling timer. Every cycle is tagged with a generation number; only the
//! most recently started cycle may write to the state.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::orchestrator::{FetchOrchestrator, FetchOutcome};
use crate::config::ControllerConfig;
use crate::domain::{Phase, PredictionView, SessionState};

struct ControllerInner {
    orchestrator: FetchOrchestrator,
    config: ControllerConfig,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    alive: AtomicBool,
    cycles: Mutex<Vec<JoinHandle<()>>>,
}

/// Session controller for the prediction dashboard
pub struct PredictionController {
    inner: Arc<ControllerInner>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl PredictionController {
    pub fn new(orchestrator: FetchOrchestrator, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(SessionState::new(config.start_in_sample_mode));
        Self {
            inner: Arc::new(ControllerInner {
                orchestrator,
                config,
                state,
                generation: AtomicU64::new(0),
                alive: AtomicBool::new(true),
                cycles: Mutex::new(Vec::new()),
            }),
            poll_task: Mutex::new(None),
        }
    }

    /// Start the first cycle and the polling timer. Must be called from
    /// within a tokio runtime.
    pub fn start(&self) {
        let mut poll_task = lock(&self.poll_task);
        if poll_task.is_some() {
            warn!("Prediction controller already started");
            return;
        }

        info!(
            poll_interval_secs = self.inner.config.poll_interval_secs,
            sample_mode = !self.inner.state.borrow().is_live_mode(),
            "Starting prediction controller"
        );
        self.inner.launch(Duration::ZERO);

        let inner = Arc::clone(&self.inner);
        let period = inner.config.poll_interval();
        *poll_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !inner.alive.load(Ordering::SeqCst) {
                    break;
                }
                debug!("Poll tick, refreshing predictions");
                inner.launch(Duration::ZERO);
            }
        }));
    }

    /// Clear the error and start a fresh cycle.
    pub fn retry(&self) {
        if !self.inner.alive.load(Ordering::SeqCst) {
            debug!("Controller stopped, ignoring retry");
            return;
        }
        info!("Manual retry requested");
        self.inner.state.send_modify(|s| {
            s.error = None;
            s.retry_attempt = 0;
        });
        self.inner.launch(Duration::ZERO);
    }

    /// Switch between live odds and sample data, then reload.
    pub fn toggle_mode(&self) {
        if !self.inner.alive.load(Ordering::SeqCst) {
            debug!("Controller stopped, ignoring mode toggle");
            return;
        }
        let mut live = false;
        self.inner.state.send_modify(|s| {
            s.forced_fallback = !s.forced_fallback;
            live = s.is_live_mode();
        });
        info!(mode = if live { "live" } else { "sample" }, "Data mode toggled");

        let delay = if live {
            self.inner.config.toggle_debounce()
        } else {
            Duration::ZERO
        };
        self.inner.launch(delay);
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn view(&self) -> PredictionView {
        self.inner.state.borrow().view()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Stop polling and abort in-flight cycles. Idempotent.
    pub fn shutdown(&self) {
        if !self.inner.alive.swap(false, Ordering::SeqCst) {
            return;
        }
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        if let Some(handle) = lock(&self.poll_task).take() {
            handle.abort();
        }
        for handle in lock(&self.inner.cycles).drain(..) {
            handle.abort();
        }
        info!("Prediction controller stopped");
    }
}

impl Drop for PredictionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl ControllerInner {
    fn is_current(&self, generation: u64) -> bool {
        self.alive.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == generation
    }

    fn launch(self: &Arc<Self>, delay: Duration) {
        if !self.alive.load(Ordering::SeqCst) {
            debug!("Controller stopped, ignoring cycle request");
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut force_sample = false;
        self.state.send_modify(|s| {
            transition(s, Phase::Loading);
            s.error = None;
            s.retry_attempt = 0;
            force_sample = s.forced_fallback;
        });

        let inner = Arc::clone(self);
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
                if !inner.is_current(generation) {
                    debug!(generation, "Debounced cycle superseded");
                    return;
                }
            }

            let progress = Arc::clone(&inner);
            let outcome = inner
                .orchestrator
                .run_cycle(force_sample, move |retry| {
                    progress.state.send_if_modified(|s| {
                        if !progress.is_current(generation) {
                            return false;
                        }
                        s.retry_attempt = retry;
                        true
                    });
                })
                .await;

            inner.apply(generation, outcome);
        });

        self.track(handle);
    }

    /// Keep a cycle handle for shutdown, or abort it if shutdown already
    /// drained the list.
    fn track(&self, handle: JoinHandle<()>) {
        let mut cycles = lock(&self.cycles);
        if !self.alive.load(Ordering::SeqCst) {
            handle.abort();
            return;
        }
        cycles.retain(|h| !h.is_finished());
        cycles.push(handle);
    }

    fn apply(&self, generation: u64, outcome: FetchOutcome) {
        let applied = self.state.send_if_modified(|s| {
            if !self.is_current(generation) {
                return false;
            }
            match &outcome {
                FetchOutcome::Success(batch) => {
                    transition(s, Phase::Ready);
                    s.predictions = batch.predictions.clone();
                    s.using_fallback = batch.origin.is_sample();
                    s.error = None;
                    s.retry_attempt = 0;
                    s.last_updated = Some(Utc::now());
                }
                FetchOutcome::Failure(e) => {
                    transition(s, Phase::Error);
                    s.error = Some(e.user_message());
                }
            }
            true
        });

        if !applied {
            debug!(generation, "Discarding result of stale fetch cycle");
        }
    }
}

fn transition(state: &mut SessionState, target: Phase) {
    if !state.phase.can_transition_to(target) {
        warn!(from = %state.phase, to = %target, "Unexpected phase transition");
    }
    state.phase = target;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
