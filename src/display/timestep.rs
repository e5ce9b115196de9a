use std::time::Instant;

type TimeFloat = f32;

/// Exponential moving average of frame times in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage {
    buffer: TimeFloat,
    alpha: TimeFloat,
}

impl MovingAverage {
    pub fn new(alpha: TimeFloat) -> MovingAverage {
        MovingAverage { buffer: 0.0, alpha }
    }

    pub fn update(&mut self, t: TimeFloat) {
        // first sample seeds the average
        if self.buffer <= 0.0 {
            self.buffer = t;
        } else {
            self.buffer = t * self.alpha + (1.0 - self.alpha) * self.buffer;
        }
    }

    pub fn get_fps(&self) -> Option<TimeFloat> {
        match self.buffer {
            t if t > 0.0 => Some(1000.0 / t), //ms->s
            _ => None,
        }
    }
}

/// Per-cycle frame timer for the preview loops.
#[derive(Debug, Clone, Copy)]
pub struct TimeStep {
    pub last_time: Instant,
    pub time_delta: TimeFloat,
    pub averager: MovingAverage,
}

impl TimeStep {
    pub fn new() -> TimeStep {
        TimeStep {
            last_time: Instant::now(),
            time_delta: 0.0,
            averager: MovingAverage::new(0.1),
        }
    }

    pub fn update(&mut self) {
        let current = Instant::now();
        let delta = current.duration_since(self.last_time).as_secs_f32() * 1000.0;
        self.last_time = current;
        self.advance(delta);
    }

    fn advance(&mut self, delta_ms: TimeFloat) {
        self.time_delta = delta_ms;
        self.averager.update(delta_ms);
    }

    /// Smoothed frame rate, `None` until a non-zero frame time was seen.
    pub fn fps(&self) -> Option<TimeFloat> {
        self.averager.get_fps()
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        TimeStep::new()
    }
}
