use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinState {
    #[default]
    Stopped,
    Spinning,
}

/// Drives the wheel's rotation angle as an endless sequence of 360° laps
///
/// The lap period is latched when a lap begins, so a speed change made mid-lap takes
/// effect at the next lap boundary. Stopping keeps the angle so a restart continues from it
#[derive(Debug, Clone, PartialEq)]
pub struct RotationAnimator {
    state: SpinState,
    lap_start: f32,
    lap_elapsed: Duration,
    lap_period: Duration,
}

const MIN_PERIOD: Duration = Duration::from_millis(1);

impl Default for RotationAnimator {
    fn default() -> Self {
        Self {
            state: SpinState::Stopped,
            lap_start: 0.0,
            lap_elapsed: Duration::ZERO,
            lap_period: Duration::from_secs(1),
        }
    }
}

impl RotationAnimator {
    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    /// Period of the lap currently in progress
    pub fn lap_period(&self) -> Duration {
        self.lap_period
    }

    /// Current angle in degrees, in `0..360`
    pub fn angle(&self) -> f32 {
        let lap = self.lap_elapsed.as_secs_f32() / self.lap_period.as_secs_f32();
        (self.lap_start + 360.0 * lap).rem_euclid(360.0)
    }

    /// Starts a new lap from the retained angle; no-op while already spinning
    pub fn start(&mut self, period: Duration) {
        if self.is_spinning() {
            return;
        }
        self.lap_period = period.max(MIN_PERIOD);
        self.lap_elapsed = Duration::ZERO;
        self.state = SpinState::Spinning;
    }

    /// Freezes the angle where it is
    pub fn stop(&mut self) {
        if !self.is_spinning() {
            return;
        }
        self.lap_start = self.angle();
        self.lap_elapsed = Duration::ZERO;
        self.state = SpinState::Stopped;
    }

    /// Advance by `delta`; `period` is only read when a new lap begins
    pub fn tick(&mut self, delta: Duration, period: Duration) {
        if !self.is_spinning() {
            return;
        }
        self.lap_elapsed += delta;
        while self.lap_elapsed >= self.lap_period {
            self.lap_elapsed -= self.lap_period;
            let next = period.max(MIN_PERIOD);
            if next != self.lap_period {
                log::debug!(
                    "lap period {}ms -> {}ms",
                    self.lap_period.as_millis(),
                    next.as_millis()
                );
            }
            self.lap_period = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speed::SpeedLevel;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn stopped_animator_ignores_time() {
        let mut rot = RotationAnimator::default();
        rot.tick(ms(5000), ms(200));
        assert_eq!(rot.angle(), 0.0);
        assert_eq!(rot.state(), SpinState::Stopped);
    }

    #[test]
    fn angle_grows_linearly_within_a_lap() {
        let mut rot = RotationAnimator::default();
        rot.start(ms(1000));
        rot.tick(ms(250), ms(1000));
        assert!((rot.angle() - 90.0).abs() < 1e-3);
        rot.tick(ms(250), ms(1000));
        assert!((rot.angle() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn one_period_is_one_full_lap() {
        let mut rot = RotationAnimator::default();
        let period = SpeedLevel::Medium.period();
        rot.start(period);
        rot.tick(ms(130), period);
        let before = rot.angle();

        rot.tick(period, period);
        assert_eq!(rot.angle(), before);
    }

    #[test]
    fn low_speed_completes_five_laps_per_second() {
        let mut rot = RotationAnimator::default();
        let period = SpeedLevel::Low.period();
        rot.start(period);
        let mut last = rot.angle();
        let mut wraps = 0;
        for _ in 0..50 {
            rot.tick(ms(20), period);
            if rot.angle() < last {
                wraps += 1;
            }
            last = rot.angle();
        }
        assert_eq!(rot.angle(), 0.0);
        // the fifth lap lands exactly on 0
        assert_eq!(wraps, 5);
    }

    #[test]
    fn speed_change_waits_for_lap_boundary() {
        let mut rot = RotationAnimator::default();
        rot.start(ms(1000));
        rot.tick(ms(500), ms(1000));

        // switching to 200ms mid-lap keeps the 1000ms lap going
        rot.tick(ms(250), ms(200));
        assert_eq!(rot.lap_period(), ms(1000));
        assert!((rot.angle() - 270.0).abs() < 1e-3);

        // 250ms finishes the lap, the remaining 50ms run at the new period
        rot.tick(ms(300), ms(200));
        assert_eq!(rot.lap_period(), ms(200));
        assert!((rot.angle() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn stop_freezes_and_restart_resumes() {
        let mut rot = RotationAnimator::default();
        rot.start(ms(600));
        rot.tick(ms(100), ms(600));
        let frozen = rot.angle();
        assert!((frozen - 60.0).abs() < 1e-3);

        rot.stop();
        rot.tick(ms(10_000), ms(600));
        assert_eq!(rot.angle(), frozen);

        rot.start(ms(200));
        assert_eq!(rot.angle(), frozen);
        rot.tick(ms(50), ms(200));
        assert!((rot.angle() - (frozen + 90.0)).abs() < 1e-3);
    }

    #[test]
    fn angle_never_decreases_mod_360_while_spinning() {
        let mut rot = RotationAnimator::default();
        rot.start(ms(1000));
        let mut unwrapped = 0.0_f32;
        let mut last = rot.angle();
        for _ in 0..120 {
            rot.tick(ms(16), ms(1000));
            let step = (rot.angle() - last).rem_euclid(360.0);
            assert!(step < 180.0);
            unwrapped += step;
            last = rot.angle();
        }
        assert!((unwrapped - 360.0 * 1.92).abs() < 0.1);
    }
}
