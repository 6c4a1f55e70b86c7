/// Fixed timestep clock
///
/// Converts wall-clock time into whole physics ticks so the player controller
/// always runs at the same rate no matter how fast frames are drawn.
use std::time::{Duration, Instant};

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// Tick clock state
pub struct TickClock {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the game is paused
    paused: bool,

    /// Total ticks handed out
    tick_count: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            tick_count: 0,
        }
    }

    /// Begin a new frame, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Feed `elapsed` time into the accumulator, returns the ticks now due
    ///
    /// Time beyond `MAX_PHYSICS_STEPS` ticks is dropped rather than carried.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }
        if ticks == MAX_PHYSICS_STEPS {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Get the fixed timestep in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get total number of ticks handed out
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = TickClock::new();
        assert_eq!(clock.tick_count(), 0);
        assert!(!clock.is_paused());
        assert!((clock.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_partial_ticks_accumulate() {
        let mut clock = TickClock::new();
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.advance(Duration::from_millis(31)), 2);
        assert_eq!(clock.tick_count(), 3);
    }

    #[test]
    fn test_max_physics_steps_limit() {
        let mut clock = TickClock::new();
        // 300ms would allow 18 ticks
        assert_eq!(clock.advance(Duration::from_millis(300)), MAX_PHYSICS_STEPS);
        // The backlog is dropped, not replayed
        assert!(clock.advance(Duration::ZERO) <= 1);
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut clock = TickClock::new();
        clock.pause();
        assert_eq!(clock.advance(Duration::from_millis(50)), 0);

        clock.resume();
        assert_eq!(clock.advance(Duration::from_millis(5)), 0);
        assert_eq!(clock.advance(Duration::from_millis(12)), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = TickClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }
}
