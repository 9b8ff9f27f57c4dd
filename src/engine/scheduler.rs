//! Explicit polling scheduler.
//!
//! Replaces implicit timer-driven refresh closures with an owned
//! start/stop surface. The scheduler polls the data provider on a fixed
//! interval and submits a snapshot only when its payload actually
//! changed. One poll step is exposed as [`tick`] so tests can drive the
//! coalescing behavior without threads or real time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::EngineConfig;

use super::orchestrator::AssessmentEngine;
use super::provider::{ChangeDetector, SnapshotProvider};

/// Background polling scheduler. Stops on [`Scheduler::stop`] or drop.
pub struct Scheduler {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Start polling `provider` every `config.poll_interval()`.
    #[must_use]
    pub fn start(
        engine: Arc<AssessmentEngine>,
        provider: Arc<dyn SnapshotProvider>,
        config: &EngineConfig,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let poll_interval = config.poll_interval();
        let debounce = config.debounce();

        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            let mut detector = ChangeDetector::new();
            while !thread_stop.load(Ordering::Relaxed) {
                sleep_unless_stopped(poll_interval, &thread_stop);
                if thread_stop.load(Ordering::Relaxed) {
                    break;
                }
                tick(&engine, provider.as_ref(), &mut detector, debounce);
            }
            tracing::debug!("scheduler stopped");
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Signal the polling thread to stop and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One poll step: read the provider, submit on real change.
///
/// A non-zero `debounce` waits briefly after detecting a change and
/// re-reads the provider, coalescing rapid successive upstream writes
/// into one recompute.
pub fn tick(
    engine: &AssessmentEngine,
    provider: &dyn SnapshotProvider,
    detector: &mut ChangeDetector,
    debounce: Duration,
) {
    match provider.latest() {
        Ok(snapshot) if detector.is_changed(&snapshot) => {
            let snapshot = if debounce.is_zero() {
                snapshot
            } else {
                std::thread::sleep(debounce);
                match provider.latest() {
                    Ok(latest) => {
                        detector.is_changed(&latest);
                        latest
                    }
                    Err(_) => snapshot,
                }
            };
            engine.submit(snapshot);
        }
        Ok(_) => tracing::debug!("no upstream change"),
        Err(e) => tracing::warn!("snapshot provider error: {e}"),
    }
}

/// Sleep in short slices so a stop request is honored promptly.
fn sleep_unless_stopped(duration: Duration, stop: &AtomicBool) {
    const SLICE: Duration = Duration::from_millis(25);
    let mut remaining = duration;
    while !remaining.is_zero() {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let step = remaining.min(SLICE);
        std::thread::sleep(step);
        remaining -= step;
    }
}
