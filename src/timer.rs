//! Generation guard for one-shot delayed actions.
//!
//! Arming a [`TimerSlot`] hands out a [`TimerToken`]; the platform timer carries
//! the token back when it fires. Re-arming or cancelling bumps the generation,
//! so a timer that was superseded can never act on newer state even if its
//! platform callback still runs.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: u64,
    armed: bool,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot, invalidating any token handed out before.
    pub fn arm(&mut self) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        TimerToken(self.generation)
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.armed = false;
    }

    /// Consume a firing timer. Returns true only for the live token.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed && token.0 == self.generation {
            self.armed = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_token_fires_once() {
        let mut slot = TimerSlot::new();
        let t = slot.arm();
        assert!(slot.fire(t));
        assert!(!slot.fire(t));
    }

    #[test]
    fn rearm_invalidates_previous_token() {
        let mut slot = TimerSlot::new();
        let old = slot.arm();
        let new = slot.arm();
        assert!(!slot.fire(old));
        assert!(slot.fire(new));
    }

    #[test]
    fn cancel_invalidates_token() {
        let mut slot = TimerSlot::new();
        let t = slot.arm();
        slot.cancel();
        assert!(!slot.fire(t));
    }
}
