/// Game loop timing and control system
///
/// Turns variable frame durations into a whole number of fixed simulation
/// ticks, so combat timers (stun, cooldowns, power-ups) always advance in
/// identical steps regardless of frame rate.
use std::time::Duration;

/// Target simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of ticks per frame to prevent spiral of death
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed ticks
    accumulator: Duration,

    /// Whether the game is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total ticks handed out
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Feed an explicit frame duration, returns the number of fixed ticks
    /// to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // Time spent paused is dropped, not banked
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Anything beyond the cap is discarded so a long stall can't turn
        // into a burst of catch-up ticks on the next frame
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Frame overran by {:?}, dropping backlog",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated seconds covered by the ticks handed out so far
    pub fn simulated_secs(&self) -> f32 {
        self.tick_count as f32 * FIXED_TIMESTEP
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        assert!((FIXED_TIMESTEP - FIXED_TIMESTEP_DURATION.as_secs_f32()).abs() < 0.0001);
    }

    #[test]
    fn test_one_tick_per_timestep() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION), 1);
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION * 2), 2);
        assert_eq!(game_loop.tick_count(), 3);
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut game_loop = GameLoop::new();
        let half = FIXED_TIMESTEP_DURATION / 2;
        assert_eq!(game_loop.advance(half), 0);
        assert_eq!(game_loop.advance(half), 1);
    }

    #[test]
    fn test_max_ticks_limit() {
        let mut game_loop = GameLoop::new();

        // A 300ms stall would allow 18 ticks
        let ticks = game_loop.advance(Duration::from_millis(300));
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);

        // The backlog is not replayed on the next frame
        assert_eq!(game_loop.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();

        assert_eq!(game_loop.advance(Duration::from_millis(50)), 0);
        assert_eq!(game_loop.tick_count(), 0);
    }

    #[test]
    fn test_resume_drops_partial_tick() {
        let mut game_loop = GameLoop::new();
        game_loop.advance(FIXED_TIMESTEP_DURATION / 2);
        game_loop.pause();
        assert!(game_loop.is_paused());
        game_loop.resume();
        assert!(!game_loop.is_paused());

        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION / 2), 0);
    }
}
