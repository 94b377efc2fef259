//! Frame chain scheduling
//!
//! The host (browser `requestAnimationFrame`, or a test clock) fires one
//! callback per display frame. `FrameDriver` keeps track of the single
//! pending request so that stopping never leaves an orphaned frame and
//! starting never queues a second one.

/// Something that can schedule a one-shot frame callback
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Ask the host for one more frame
    fn request_frame(&mut self) -> Self::Handle;

    /// Withdraw a previously requested frame
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Owns the start/stop state of the frame chain
#[derive(Debug)]
pub struct FrameDriver<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    frames_run: u64,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            frames_run: 0,
        }
    }

    /// Request the next frame unless one is already pending.
    /// Returns true if a new request was made.
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Cancel the pending frame, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// The host fired a frame; the pending request is consumed
    pub fn begin_frame(&mut self) {
        self.pending = None;
        self.frames_run += 1;
    }

    /// Whether a frame is currently requested
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of frames the host has fired through this driver
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Deterministic scheduler: requests are queued until someone steps them
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<u64>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding frame requests
    pub fn pending(&self) -> &[u64] {
        &self.pending
    }

    /// Pop the oldest outstanding request (the host firing it)
    pub fn fire_next(&mut self) -> Option<u64> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Total requests ever made
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests ever cancelled
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> u64 {
        self.next_id += 1;
        self.requested += 1;
        self.pending.push(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, handle: u64) {
        if let Some(i) = self.pending.iter().position(|&h| h == handle) {
            self.pending.remove(i);
            self.cancelled += 1;
        }
    }
}

/// Fixed-period timer on a simulated clock
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: f64,
    next_due_ms: f64,
}

impl IntervalTimer {
    /// First firing is one period after `start_ms`
    pub fn new(period_ms: f64, start_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: start_ms + period_ms,
        }
    }

    /// When the timer fires next
    pub fn next_due(&self) -> f64 {
        self.next_due_ms
    }

    /// Number of firings due up to and including `now_ms`
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let mut fires = 0;
        while self.next_due_ms <= now_ms {
            self.next_due_ms += self.period_ms;
            fires += 1;
        }
        fires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requests_once() {
        let mut driver = FrameDriver::new(ManualScheduler::new());
        assert!(driver.start());
        assert!(!driver.start());
        assert_eq!(driver.scheduler().pending().len(), 1);
        assert!(driver.is_scheduled());
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut driver = FrameDriver::new(ManualScheduler::new());
        driver.start();
        driver.stop();
        assert!(!driver.is_scheduled());
        assert!(driver.scheduler().pending().is_empty());
        assert_eq!(driver.scheduler().cancelled(), 1);

        // Stopping twice is harmless
        driver.stop();
        assert_eq!(driver.scheduler().cancelled(), 1);
    }

    #[test]
    fn test_begin_frame_consumes_request() {
        let mut driver = FrameDriver::new(ManualScheduler::new());
        driver.start();
        let fired = driver.scheduler_mut().fire_next();
        assert_eq!(fired, Some(1));
        driver.begin_frame();
        assert!(!driver.is_scheduled());
        assert_eq!(driver.frames_run(), 1);

        // Chain continues
        assert!(driver.start());
        assert_eq!(driver.scheduler().pending(), &[2]);
    }

    #[test]
    fn test_interval_timer_fires_per_period() {
        let mut timer = IntervalTimer::new(1000.0, 0.0);
        assert_eq!(timer.poll(999.0), 0);
        assert_eq!(timer.poll(1000.0), 1);
        assert_eq!(timer.poll(1500.0), 0);
        assert_eq!(timer.poll(5000.0), 4);
        assert_eq!(timer.next_due(), 6000.0);
    }
}
