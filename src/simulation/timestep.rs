//! Fixed-timestep accumulator
//!
//! Decouples the physics tick from the render rate: wall-clock frame time is
//! accumulated and drained in whole `dt` ticks. Also carries the pause /
//! single-step state a sandbox shell toggles from the keyboard.

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    pub dt: f64,
    pub max_steps_per_frame: usize,
    accumulator: f64,
    paused: bool,
    step_requested: bool,
}

impl FixedTimestep {
    pub fn new(dt: f64, max_steps_per_frame: usize) -> Self {
        Self {
            dt,
            max_steps_per_frame: max_steps_per_frame.max(1),
            accumulator: 0.0,
            paused: false,
            step_requested: false,
        }
    }

    /// Number of ticks to run for a frame that took `frame_time` seconds
    ///
    /// Time beyond `max_steps_per_frame` ticks is dropped rather than carried,
    /// so a slow frame cannot snowball into ever longer frames. While paused,
    /// accumulated time is discarded and only a pending single-step request
    /// produces a tick.
    pub fn advance(&mut self, frame_time: f64) -> usize {
        if self.dt <= 0.0 {
            return 0;
        }

        if self.paused {
            self.accumulator = 0.0;
            if self.step_requested {
                self.step_requested = false;
                return 1;
            }
            return 0;
        }

        self.accumulator += frame_time.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_steps_per_frame {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if steps == self.max_steps_per_frame && self.accumulator >= self.dt {
            log::debug!("dropping {:.4}s of simulation time", self.accumulator);
            self.accumulator %= self.dt;
        }
        steps
    }

    /// Leftover time not yet consumed by a tick, in `[0, dt)` after `advance`
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Fraction of the next tick already elapsed, for render interpolation
    pub fn alpha(&self) -> f64 {
        if self.dt > 0.0 {
            self.accumulator / self.dt
        } else {
            0.0
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if !paused {
            self.step_requested = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Ask for exactly one tick on the next `advance`; ignored unless paused
    pub fn request_step(&mut self) {
        if self.paused {
            self.step_requested = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_whole_ticks_and_keeps_remainder() {
        let mut ts = FixedTimestep::new(0.01, 10);
        assert_eq!(ts.advance(0.025), 2);
        assert!((ts.accumulator() - 0.005).abs() < 1e-12);
        assert_eq!(ts.advance(0.006), 1);
    }

    #[test]
    fn caps_steps_and_drops_backlog() {
        let mut ts = FixedTimestep::new(0.01, 3);
        assert_eq!(ts.advance(1.0), 3);
        assert!(ts.accumulator() < 0.01);
    }

    #[test]
    fn paused_only_single_steps() {
        let mut ts = FixedTimestep::new(0.01, 4);
        ts.toggle_pause();
        assert_eq!(ts.advance(0.5), 0);
        ts.request_step();
        assert_eq!(ts.advance(0.5), 1);
        assert_eq!(ts.advance(0.5), 0);
        ts.toggle_pause();
        assert_eq!(ts.advance(0.0), 0);
    }

    #[test]
    fn step_request_ignored_while_running() {
        let mut ts = FixedTimestep::new(0.01, 4);
        ts.request_step();
        assert_eq!(ts.advance(0.0), 0);
    }
}
