//! Ready Gate
//!
//! Countdown barrier for the initial image load. Every newly requested
//! resource arms one count; every completed load arrives once. The gate
//! opens a single time, when nothing is outstanding and nothing failed.

#[derive(Debug, Default, Clone)]
pub struct ReadyGate {
    requested: usize,
    outstanding: usize,
    failed: usize,
    fired: bool,
}

impl ReadyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect one more resource
    pub fn arm(&mut self) {
        self.requested += 1;
        self.outstanding += 1;
    }

    /// Record one completed load
    pub fn arrive(&mut self, success: bool) {
        debug_assert!(self.outstanding > 0, "arrive() without a matching arm()");
        self.outstanding = self.outstanding.saturating_sub(1);
        if !success {
            self.failed += 1;
        }
    }

    /// Everything requested has loaded successfully
    pub fn is_open(&self) -> bool {
        self.outstanding == 0 && self.failed == 0
    }

    /// Returns true exactly once: the first call after the gate opens.
    /// A gate that was never armed stays shut.
    pub fn try_fire(&mut self) -> bool {
        if self.fired || self.requested == 0 || !self.is_open() {
            return false;
        }
        self.fired = true;
        true
    }

    /// Loads completed so far (successful or not)
    pub fn completed(&self) -> usize {
        self.requested - self.outstanding
    }

    pub fn requested(&self) -> usize {
        self.requested
    }
}
