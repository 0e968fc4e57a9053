use std::time::Duration;

/// Whether the fan is running, derived from the toggle switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    #[default]
    Off,
    On,
}

impl PowerState {
    pub fn is_on(self) -> bool {
        self == PowerState::On
    }
}

/// The three selectable fan speeds
///
/// Each level maps to a lap period; a shorter period spins faster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedLevel {
    #[default]
    High,
    Medium,
    Low,
}

impl SpeedLevel {
    /// Selectors in the order they appear on the control bar
    pub const ALL: [SpeedLevel; 3] = [SpeedLevel::High, SpeedLevel::Medium, SpeedLevel::Low];

    /// Milliseconds per full 360° lap
    pub const fn period_ms(self) -> u64 {
        match self {
            SpeedLevel::High => 1000,
            SpeedLevel::Medium => 600,
            SpeedLevel::Low => 200,
        }
    }

    pub const fn period(self) -> Duration {
        Duration::from_millis(self.period_ms())
    }

    /// Whether the selector for `self` lights up given the fan's state
    ///
    /// A selector is lit while powered whenever the active period is at most its own,
    /// so `High` is lit for every speed
    pub fn is_highlighted(self, power: PowerState, current: SpeedLevel) -> bool {
        power.is_on() && current.period_ms() <= self.period_ms()
    }
}
