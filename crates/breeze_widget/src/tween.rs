use std::time::Duration;

/// Easing curve applied to normalized animation time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Material standard curve, `CubicBezier(0.4, 0.0, 0.2, 1.0)`
    #[default]
    FastOutSlowIn,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the curve to normalized time (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::FastOutSlowIn => cubic_bezier_sample(t, 0.4, 0.0, 0.2, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_sample(t, x1, y1, x2, y2),
        }
    }
}

fn cubic_bezier_sample(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    // Newton-Raphson for the curve parameter whose x equals t
    let mut guess = t;
    for _ in 0..8 {
        let x = cubic_bezier_value(guess, x1, x2) - t;
        if x.abs() < 1e-5 {
            break;
        }
        let dx = cubic_bezier_derivative(guess, x1, x2);
        if dx.abs() < 1e-6 {
            break;
        }
        guess -= x / dx;
    }
    cubic_bezier_value(guess.clamp(0.0, 1.0), y1, y2)
}

fn cubic_bezier_value(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn cubic_bezier_derivative(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// A bounded, one-shot animation of a single `f32`
///
/// Interruptible: [`Tween::retarget`] restarts from wherever the value currently is
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    /// A tween that has already arrived at `value`
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, Duration::ZERO, Easing::Linear)
    }

    /// Normalized progress in `0..=1`
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Current value without advancing time
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `delta` & return the new value
    pub fn tick(&mut self, delta: Duration) -> f32 {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.value()
    }

    /// Restart toward `to` from the current value, keeping duration & easing
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    /// Jump straight to `value` & stop
    pub fn snap_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed = self.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn near(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::FastOutSlowIn,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ] {
            assert!(easing.apply(0.0).abs() < 1e-4);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn fast_out_slow_in_leads_linear() {
        let e = Easing::FastOutSlowIn;
        assert!(e.apply(0.5) > 0.5);
        assert!(e.apply(0.25) < e.apply(0.5));
        assert!(e.apply(0.9) <= 1.0);
    }

    #[test]
    fn tween_runs_to_completion() {
        let mut tween = Tween::new(0.0, 48.0, ms(300), Easing::Linear);
        assert!(near(tween.tick(ms(150)), 24.0));
        assert!(!tween.is_finished());
        assert_eq!(tween.tick(ms(500)), 48.0);
        assert!(tween.is_finished());
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0, 100.0, ms(200), Easing::Linear);
        tween.tick(ms(50));
        assert!(near(tween.value(), 25.0));

        tween.retarget(0.0);
        assert!(near(tween.value(), 25.0));
        assert_eq!(tween.target(), 0.0);
        tween.tick(ms(100));
        assert!(near(tween.value(), 12.5));
        tween.tick(ms(100));
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn settled_tween_is_finished() {
        let mut tween = Tween::settled(7.0);
        assert!(tween.is_finished());
        assert_eq!(tween.tick(ms(16)), 7.0);
        tween.snap_to(3.0);
        assert_eq!(tween.value(), 3.0);
    }
}
