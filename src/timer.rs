//! Timing for the fixed simulation rate and the render rate.

use std::time::Duration;

use web_time::Instant;

/// Accumulator deciding when the simulation takes a step.
///
/// Decouples the snake speed from the frame rate.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTimer {
    /// Seconds between two steps.
    interval: f32,
    /// Seconds elapsed since the previous step.
    accumulator: f32,
}

impl StepTimer {
    /// Create a timer that fires every `interval` seconds.
    #[inline]
    #[must_use]
    pub const fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Add the frame time to the accumulator.
    ///
    /// At most a single step is taken per frame, a huge frame time doesn't cause the simulation to catch up.
    ///
    /// # Arguments
    ///
    /// * `frame_time` - Seconds since the previous frame.
    ///
    /// # Returns
    ///
    /// - `true` when the interval has been reached and a step must be taken, the accumulator is reset to zero.
    #[inline]
    pub fn tick(&mut self, frame_time: f32) -> bool {
        self.accumulator += frame_time;

        if self.accumulator >= self.interval {
            self.accumulator = 0.0;

            true
        } else {
            false
        }
    }

    /// Seconds elapsed since the previous step.
    #[inline]
    #[must_use]
    pub const fn accumulator(&self) -> f32 {
        self.accumulator
    }
}

/// Decides when the next frame should be drawn to reach a target frame rate.
#[derive(Debug, Clone)]
pub struct FramePacer {
    /// Time a single frame should take.
    frame_duration: Duration,
    /// Moment the next frame is due.
    next_frame: Instant,
}

impl FramePacer {
    /// Create a pacer with the first frame due immediately.
    ///
    /// # Arguments
    ///
    /// * `frames_per_second` - Target frame rate, clamped to at least one.
    #[must_use]
    pub fn new(frames_per_second: u32, now: Instant) -> Self {
        let frame_duration = Duration::from_secs(1) / frames_per_second.max(1);

        Self {
            frame_duration,
            next_frame: now,
        }
    }

    /// Whether a frame should be drawn now.
    #[inline]
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Moment the next frame is due.
    #[inline]
    #[must_use]
    pub const fn next_frame(&self) -> Instant {
        self.next_frame
    }

    /// Mark a frame as drawn, scheduling the next one.
    ///
    /// When we fell behind more than a whole frame the schedule restarts from `now` instead of rushing multiple frames.
    pub fn frame_drawn(&mut self, now: Instant) {
        self.next_frame += self.frame_duration;

        if self.next_frame < now {
            self.next_frame = now + self.frame_duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{FramePacer, StepTimer};

    #[test]
    fn step_below_interval() {
        let mut timer = StepTimer::new(0.1);

        assert!(!timer.tick(0.03));
        assert!(!timer.tick(0.03));
        assert!(!timer.tick(0.03));
        assert!((timer.accumulator() - 0.09).abs() < 1e-6);
    }

    #[test]
    fn step_resets_to_zero() {
        let mut timer = StepTimer::new(0.1);

        assert!(!timer.tick(0.06));
        assert!(timer.tick(0.06));
        // Overshoot is discarded, not carried over
        assert!(timer.accumulator().abs() < f32::EPSILON);
        assert!(!timer.tick(0.06));
    }

    #[test]
    fn step_at_exact_interval() {
        let mut timer = StepTimer::new(0.25);

        assert!(timer.tick(0.25));
    }

    #[test]
    fn single_step_for_huge_frame() {
        let mut timer = StepTimer::new(0.1);

        // Ten intervals worth of time only results in a single step
        assert!(timer.tick(1.0));
        assert!(!timer.tick(0.0));
    }

    #[test]
    fn pacer_schedules_frames() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(50, start);
        assert!(pacer.is_due(start));

        pacer.frame_drawn(start);
        assert!(!pacer.is_due(start));
        assert!(!pacer.is_due(start + Duration::from_millis(19)));
        assert!(pacer.is_due(start + Duration::from_millis(20)));
        assert_eq!(pacer.next_frame(), start + Duration::from_millis(20));
    }

    #[test]
    fn pacer_restarts_when_behind() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(50, start);

        // Drawing took way longer than a frame
        let late = start + Duration::from_millis(500);
        pacer.frame_drawn(late);
        assert_eq!(pacer.next_frame(), late + Duration::from_millis(20));
    }
}
