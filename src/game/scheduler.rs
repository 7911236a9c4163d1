/// Handle for one armed tick. Re-arming or cancelling the scheduler
/// invalidates every token issued before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTick {
    token: TickToken,
    remaining: f64,
}

/// Single-shot, cancelable delayed tick.
///
/// At most one tick is pending at a time. The owner re-arms after each tick
/// completes, which forms a self-rescheduling timer rather than a fixed-rate
/// loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickScheduler {
    generation: u64,
    pending: Option<PendingTick>,
    claimed: bool,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tick `delay` seconds from now, superseding any pending one
    pub fn arm(&mut self, delay: f64) -> TickToken {
        self.generation += 1;
        let token = TickToken(self.generation);
        self.pending = Some(PendingTick {
            token,
            remaining: delay.max(0.0),
        });
        self.claimed = false;
        token
    }

    /// Drop the pending tick; its token will no longer be accepted
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.claimed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Token and seconds remaining for the pending tick
    pub fn pending(&self) -> Option<(TickToken, f64)> {
        self.pending.map(|tick| (tick.token, tick.remaining))
    }

    /// Let `dt` seconds pass. Returns the token once its delay has elapsed;
    /// the caller then runs the tick with it.
    pub fn advance(&mut self, dt: f64) -> Option<TickToken> {
        let tick = self.pending.as_mut()?;
        tick.remaining = (tick.remaining - dt.max(0.0)).max(0.0);
        if tick.remaining > 0.0 {
            return None;
        }
        let token = tick.token;
        self.pending = None;
        Some(token)
    }

    /// Accept `token` for execution exactly once. Stale or already used
    /// tokens are refused.
    pub fn claim(&mut self, token: TickToken) -> bool {
        if self.claimed || token.0 != self.generation {
            return false;
        }
        self.claimed = true;
        self.pending = None;
        true
    }
}
