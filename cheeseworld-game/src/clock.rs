use std::fmt;

pub trait Clock {
    type Instant: fmt::Debug + Copy;

    fn now(&self) -> Self::Instant;
    fn seconds_elapsed(&self, start: Self::Instant, end: Self::Instant) -> f32;
}

/// Drives the per-frame step: each tick reports the time since the previous one.
pub struct FrameTicker<C: Clock> {
    clock: C,
    last_frame: C::Instant,
}

impl<C: Clock> FrameTicker<C> {
    pub fn new(clock: C) -> Self {
        Self {
            last_frame: clock.now(),
            clock,
        }
    }

    pub fn tick(&mut self) -> f32 {
        let this_frame = self.clock.now();
        let delta_time = self.clock.seconds_elapsed(self.last_frame, this_frame);
        self.last_frame = this_frame;
        delta_time.max(0.0)
    }
}
