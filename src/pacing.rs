//! Frame-rate cap
//!
//! The event loop asks the pacer whether a frame is due; if not, it sleeps
//! until the returned deadline.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Render now
    Frame,
    /// Nothing to do before this instant
    WaitUntil(Instant),
}

#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Instant,
}

impl FramePacer {
    /// The first frame is due immediately
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now,
        }
    }

    pub fn poll(&mut self, now: Instant) -> Pace {
        if self.interval.is_zero() {
            return Pace::Frame;
        }
        if now < self.next {
            return Pace::WaitUntil(self.next);
        }

        self.next += self.interval;
        // Behind by more than a whole frame: start over instead of catching up
        if self.next < now {
            self.next = now + self.interval;
        }
        Pace::Frame
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_frame_immediate() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(INTERVAL, t0);
        assert_eq!(pacer.poll(t0), Pace::Frame);
        assert_eq!(pacer.deadline(), t0 + INTERVAL);
    }

    #[test]
    fn test_waits_until_deadline() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(INTERVAL, t0);
        pacer.poll(t0);

        let early = t0 + Duration::from_millis(5);
        assert_eq!(pacer.poll(early), Pace::WaitUntil(t0 + INTERVAL));
        assert_eq!(pacer.poll(t0 + INTERVAL), Pace::Frame);
        assert_eq!(pacer.deadline(), t0 + INTERVAL * 2);
    }

    #[test]
    fn test_resyncs_after_stall() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(INTERVAL, t0);
        pacer.poll(t0);

        let late = t0 + Duration::from_millis(500);
        assert_eq!(pacer.poll(late), Pace::Frame);
        assert_eq!(pacer.deadline(), late + INTERVAL);
        // No burst of catch-up frames
        assert!(matches!(pacer.poll(late), Pace::WaitUntil(_)));
    }

    #[test]
    fn test_uncapped_always_renders() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(Duration::ZERO, t0);
        assert_eq!(pacer.poll(t0), Pace::Frame);
        assert_eq!(pacer.poll(t0), Pace::Frame);
    }
}
