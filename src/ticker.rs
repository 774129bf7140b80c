use std::time::{Duration, Instant};

/// Frame clock for the main loop
///
/// Sleeps away whatever is left of each frame's budget. Animation advances
/// per frame, so a slow machine scrolls slower.
pub struct Ticker {
    frame_budget: Duration,
    frame_start: Instant,
}

impl Ticker {
    pub fn new(target_fps: u32) -> Self {
        Ticker {
            frame_budget: frame_budget(target_fps),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Finish the current frame and block until the next one is due
    pub fn wait_for_next_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if let Some(remaining) = self.frame_budget.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}

/// Time per frame for `target_fps`; zero is treated as one frame per second
pub fn frame_budget(target_fps: u32) -> Duration {
    Duration::from_secs(1) / target_fps.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_budget() {
        assert_eq!(frame_budget(60), Duration::new(0, 16_666_666));
        assert_eq!(frame_budget(1), Duration::from_secs(1));
        assert_eq!(frame_budget(0), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_respects_budget() {
        let mut ticker = Ticker::new(200);
        let start = Instant::now();

        ticker.wait_for_next_frame();
        ticker.wait_for_next_frame();

        assert!(start.elapsed() >= ticker.frame_budget() * 2);
    }
}
