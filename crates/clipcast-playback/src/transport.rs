//! Playback transport: the per-frame playhead advance loop.
//!
//! The host drives this cooperatively — one `tick` per repaint while
//! playing, suspended otherwise. The transport owns only `current_time`
//! and `is_playing`; it reads the timeline duration and proposes monotonic
//! advances. External seeks may overwrite `current_time` at any moment,
//! including mid-playback, and simply become the next tick's baseline.

use std::time::Instant;

/// Maximum wall-clock delta absorbed per tick, in seconds.
///
/// Large gaps (backgrounded tab, suspended host) would otherwise jump the
/// playhead far ahead on resume.
pub const MAX_TICK_DELTA: f64 = 0.1;

/// Playback transport state.
#[derive(Debug)]
pub struct Transport {
    current_time: f64,
    is_playing: bool,
    speed: f64,
    out_point: Option<f64>,
    /// Wall-clock baseline for the next delta. None while paused.
    last_tick: Option<Instant>,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            is_playing: false,
            speed: 1.0,
            out_point: None,
            last_tick: None,
        }
    }

    /// Current playhead time in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn out_point(&self) -> Option<f64> {
        self.out_point
    }

    /// Start playback. Resets the tick baseline to `now` so the first
    /// delta is one frame, not the time since the loop last ran.
    pub fn play(&mut self, now: Instant) {
        if !self.is_playing {
            self.is_playing = true;
            self.last_tick = Some(now);
        }
    }

    /// Stop playback. Drops the tick baseline, which cancels any pending
    /// advance — no tick fires after pause is observed.
    pub fn pause(&mut self) {
        self.is_playing = false;
        self.last_tick = None;
    }

    /// Seek the playhead. Allowed at any time, including while playing;
    /// the next tick continues forward from here.
    pub fn seek(&mut self, time: f64) {
        self.current_time = time.max(0.0);
    }

    /// Set the playback speed multiplier. Takes effect on the next tick.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Set or clear the auto-stop point. When set it overrides the
    /// timeline duration as the stop boundary.
    pub fn set_out_point(&mut self, out_point: Option<f64>) {
        self.out_point = out_point;
    }

    /// One per-frame tick. Returns `true` if another tick should be
    /// scheduled, `false` when stopped (paused or boundary reached).
    pub fn tick(&mut self, now: Instant, timeline_duration: f64) -> bool {
        if !self.is_playing {
            return false;
        }
        let delta = match self.last_tick {
            Some(last) => now.duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.advance(delta, timeline_duration)
    }

    /// Advance the playhead by an elapsed wall-clock delta, clamped to
    /// [`MAX_TICK_DELTA`]. Inert while paused. Stops exactly at the
    /// boundary — the playhead never overshoots `out_point` (or the
    /// timeline duration).
    pub fn advance(&mut self, delta: f64, timeline_duration: f64) -> bool {
        if !self.is_playing {
            return false;
        }
        let delta = delta.min(MAX_TICK_DELTA);
        let new_time = self.current_time + delta * self.speed;
        let end = self.out_point.unwrap_or(timeline_duration);

        if end > 0.0 && new_time >= end {
            self.current_time = end;
            self.is_playing = false;
            self.last_tick = None;
            return false;
        }
        self.current_time = new_time;
        true
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn playing_transport(at: f64) -> Transport {
        let mut transport = Transport::new();
        transport.seek(at);
        transport.play(Instant::now());
        transport
    }

    #[test]
    fn test_stops_exactly_at_duration() {
        let mut transport = playing_transport(1.9);
        for _ in 0..30 {
            if !transport.advance(FRAME, 2.0) {
                break;
            }
        }
        assert_eq!(transport.current_time(), 2.0);
        assert!(!transport.is_playing());
    }

    #[test]
    fn test_out_point_overrides_duration() {
        let mut transport = playing_transport(9.5);
        transport.set_out_point(Some(10.0));
        for _ in 0..60 {
            if !transport.advance(FRAME, 60.0) {
                break;
            }
        }
        assert_eq!(transport.current_time(), 10.0);
        assert!(!transport.is_playing());
    }

    #[test]
    fn test_speed_scales_advancement() {
        let mut transport = playing_transport(0.0);
        transport.set_speed(2.0);
        for _ in 0..60 {
            transport.advance(FRAME, 1000.0);
        }
        assert!((transport.current_time() - 2.0).abs() < 1e-9);

        let mut transport = playing_transport(0.0);
        transport.set_speed(0.5);
        for _ in 0..60 {
            transport.advance(FRAME, 1000.0);
        }
        assert!((transport.current_time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_large_delta_clamped() {
        let mut transport = playing_transport(0.0);
        transport.advance(5.0, 1000.0);
        assert_eq!(transport.current_time(), MAX_TICK_DELTA);
    }

    #[test]
    fn test_tick_after_pause_is_inert() {
        let mut transport = playing_transport(0.0);
        transport.pause();
        assert!(!transport.tick(Instant::now(), 1000.0));
        assert_eq!(transport.current_time(), 0.0);
    }

    #[test]
    fn test_advance_while_paused_is_inert() {
        let mut transport = Transport::new();
        assert!(!transport.advance(FRAME, 1000.0));
        assert_eq!(transport.current_time(), 0.0);

        let mut transport = playing_transport(0.0);
        transport.pause();
        assert!(!transport.advance(FRAME, 1000.0));
        assert_eq!(transport.current_time(), 0.0);
    }

    #[test]
    fn test_seek_while_playing_becomes_new_baseline() {
        let mut transport = playing_transport(0.0);
        transport.advance(FRAME, 1000.0);
        transport.seek(500.0);
        transport.advance(FRAME, 1000.0);
        assert!((transport.current_time() - (500.0 + FRAME)).abs() < 1e-9);
    }

    #[test]
    fn test_seek_clamps_to_zero() {
        let mut transport = Transport::new();
        transport.seek(-3.0);
        assert_eq!(transport.current_time(), 0.0);
    }

    #[test]
    fn test_zero_duration_plays_into_void() {
        // No items and no out point: nothing to stop at.
        let mut transport = playing_transport(0.0);
        assert!(transport.advance(FRAME, 0.0));
        assert!(transport.is_playing());
    }

    #[test]
    fn test_play_resets_baseline() {
        let mut transport = Transport::new();
        let start = Instant::now();
        transport.play(start);
        // First tick at the same instant advances by zero.
        assert!(transport.tick(start, 1000.0));
        assert_eq!(transport.current_time(), 0.0);
    }
}
