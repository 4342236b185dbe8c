//! Search clock with a background thread, exposing two distinct
//! signals: `triggered` (time is up, return what has been searched)
//! and `cancelled` (the caller aborted, discard the in-flight result).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Shared timer state a search checks on its move loop.
#[derive(Clone)]
pub struct MoveTimer {
    triggered: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
}

impl MoveTimer {
    #[must_use]
    pub fn new() -> Self {
        MoveTimer {
            triggered: Arc::new(AtomicBool::new(false)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn triggered(&self) -> bool {
        self.triggered.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// True if the search should stop for either reason.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.triggered() || self.cancelled()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn fire(&self) {
        self.triggered.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.triggered.store(false, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    /// Spawns a background thread that fires `triggered` after
    /// `budget`, unless the timer is reset first. The handle is
    /// detached-on-drop; callers that want to join it should keep the
    /// returned `JoinHandle`.
    #[must_use]
    pub fn start(&self, budget: Duration) -> JoinHandle<()> {
        let triggered = Arc::clone(&self.triggered);
        let cancelled = Arc::clone(&self.cancelled);
        let deadline = Instant::now() + budget;
        thread::Builder::new()
            .name("move-timer".into())
            .spawn(move || {
                while Instant::now() < deadline {
                    if cancelled.load(Ordering::Relaxed) {
                        return;
                    }
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    thread::sleep(Duration::from_millis(5).min(remaining.max(Duration::from_millis(1))));
                }
                if !cancelled.load(Ordering::Relaxed) {
                    triggered.store(true, Ordering::Relaxed);
                }
            })
            .expect("failed to spawn move timer thread")
    }
}

impl Default for MoveTimer {
    fn default() -> Self {
        MoveTimer::new()
    }
}
