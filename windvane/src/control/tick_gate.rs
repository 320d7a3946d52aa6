// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Counter/divisor pair that turns the fixed tick rate into a slower cadence.

/// Fires once every `threshold` raw ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickGate {
    count: u32,
    threshold: u32,
}

impl TickGate {
    /// Create a gate. A threshold of 0 is treated as 1 (fire on every tick).
    pub const fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Count one raw tick. Returns true when the gated action should run.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Count `ticks` raw ticks at once and return how many times the gate fired.
    pub fn advance(&mut self, ticks: u32) -> u32 {
        let total = self.count as u64 + ticks as u64;
        let threshold = self.threshold as u64;
        self.count = (total % threshold) as u32;
        (total / threshold) as u32
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
