// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! SysTick busy-wait delay exposed as `embedded_hal::delay::DelayNs`.

use cortex_m::{delay::Delay, peripheral::SYST};
use embedded_hal::delay::DelayNs;

pub struct SysDelay {
    inner: Delay,
}

impl SysDelay {
    /// `ahb_hz` is the core clock that feeds SysTick.
    pub fn new(syst: SYST, ahb_hz: u32) -> Self {
        Self {
            inner: Delay::new(syst, ahb_hz),
        }
    }
}

impl DelayNs for SysDelay {
    // SysTick resolution is coarser than a nanosecond; round up to the next microsecond.
    fn delay_ns(&mut self, ns: u32) {
        self.inner.delay_us(ns.div_ceil(1_000));
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        self.inner.delay_us(us);
    }

    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }
}
