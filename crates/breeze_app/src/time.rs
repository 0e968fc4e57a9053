use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
fn now() -> Duration {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(Duration::ZERO, |p| Duration::from_secs_f64(p.now().max(0.0) / 1000.0))
}

#[cfg(not(target_arch = "wasm32"))]
fn now(start: Instant) -> Duration {
    start.elapsed()
}

const FPS_WINDOW: Duration = Duration::from_secs(1);

pub struct FrameTimer {
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
    last_time: Option<Duration>,
    elapsed: Duration,
    accumulator: Duration,
    frame_count: u32,
    /// Time in seconds since the last frame
    pub delta: f32,
    /// Frames per second, updated once per second
    pub fps: u32,
    /// Total number of frames rendered since start
    pub frame: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: Instant::now(),
            last_time: None,
            elapsed: Duration::ZERO,
            accumulator: Duration::ZERO,
            frame_count: 0,
            delta: 0.0,
            fps: 0,
            frame: 0,
        }
    }
}

impl FrameTimer {
    /// Exact time since the last frame, for feeding animations
    pub fn frame_duration(&self) -> Duration {
        self.elapsed
    }

    /// Updates delta time & calculates FPS
    pub(crate) fn update(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        let cur_time = now(self.start);
        #[cfg(target_arch = "wasm32")]
        let cur_time = now();

        self.advance(cur_time);
    }

    // timestamps stay integer nanoseconds so deltas don't coarsen over long sessions
    fn advance(&mut self, cur_time: Duration) {
        // the first frame has nothing to measure against
        self.elapsed = self
            .last_time
            .map_or(Duration::ZERO, |last| cur_time.saturating_sub(last));
        self.last_time = Some(cur_time);
        self.delta = self.elapsed.as_secs_f32();

        self.accumulator += self.elapsed;
        self.frame_count += 1;
        self.frame += 1;

        if self.accumulator >= FPS_WINDOW {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.accumulator = Duration::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn first_frame_has_no_delta() {
        let mut timer = FrameTimer::default();
        timer.advance(ms(5000));
        assert_eq!(timer.delta, 0.0);
        assert_eq!(timer.frame, 1);
        assert_eq!(timer.frame_duration(), Duration::ZERO);
    }

    #[test]
    fn delta_and_fps() {
        let mut timer = FrameTimer::default();
        timer.advance(Duration::ZERO);
        for i in 1..=4 {
            timer.advance(ms(i * 250));
        }
        assert_eq!(timer.delta, 0.25);
        assert_eq!(timer.fps, 5);
        assert_eq!(timer.frame, 5);
        assert_eq!(timer.frame_duration(), ms(250));
    }

    #[test]
    fn clock_going_backwards_is_clamped() {
        let mut timer = FrameTimer::default();
        timer.advance(ms(2000));
        timer.advance(ms(1000));
        assert_eq!(timer.delta, 0.0);
        assert_eq!(timer.frame_duration(), Duration::ZERO);
    }

    #[test]
    fn frame_duration_stays_exact_after_a_long_session() {
        // a day in, f32 seconds would only resolve ~8 ms steps
        let day = Duration::from_secs(24 * 60 * 60);
        let mut timer = FrameTimer::default();
        timer.advance(day);
        timer.advance(day + Duration::from_micros(16_667));
        assert_eq!(timer.frame_duration(), Duration::from_micros(16_667));
    }
}
