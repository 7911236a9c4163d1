/// A timer counting real seconds down to zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f64,
}

impl Countdown {
    pub fn new(seconds: f64) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Subtract `dt` (clamped at zero). Returns true once the timer has run out.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.is_expired()
    }
}

/// Timers that expired during one `TimedEffects::advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired {
    pub special_food: bool,
    pub boost: bool,
}

/// Special food lifetime and speed boost countdowns. Both run on frame time,
/// not tick time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimedEffects {
    special_food: Option<Countdown>,
    boost: Option<Countdown>,
}

impl TimedEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate_special_food(&mut self, lifetime: f64) {
        self.special_food = Some(Countdown::new(lifetime));
    }

    pub fn deactivate_special_food(&mut self) {
        self.special_food = None;
    }

    /// Starts the boost, or restarts it from full if already running
    pub fn activate_boost(&mut self, duration: f64) {
        self.boost = Some(Countdown::new(duration));
    }

    pub fn special_food_active(&self) -> bool {
        self.special_food.is_some()
    }

    pub fn boost_active(&self) -> bool {
        self.boost.is_some()
    }

    pub fn special_food_remaining(&self) -> Option<f64> {
        self.special_food.map(|timer| timer.remaining())
    }

    pub fn boost_remaining(&self) -> Option<f64> {
        self.boost.map(|timer| timer.remaining())
    }

    pub fn clear(&mut self) {
        self.special_food = None;
        self.boost = None;
    }

    /// Count both timers down by `dt`; expired timers are dropped and reported
    pub fn advance(&mut self, dt: f64) -> Expired {
        let mut expired = Expired::default();

        if let Some(timer) = self.special_food.as_mut() {
            if timer.advance(dt) {
                self.special_food = None;
                expired.special_food = true;
            }
        }

        if let Some(timer) = self.boost.as_mut() {
            if timer.advance(dt) {
                self.boost = None;
                expired.boost = true;
            }
        }

        expired
    }
}
