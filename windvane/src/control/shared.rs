// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! State shared between the timer interrupt and the main loop.
//!
//! Every field is a single 32-bit atomic, so neither side can observe a half-written value and no
//! critical section is needed. Access is split into two ports:
//!
//! - [`TickPort`] (interrupt): records raw ticks, publishes the step count, reads the plan.
//! - [`MainPort`] (main loop): drains ticks, publishes the plan, reads the step count.
//!
//! Each field has exactly one writing port; `pending_ticks` is only touched with read-modify-write
//! operations from both sides.
//!
//! ```ignore
//! static SHARED: Shared = Shared::new();
//!
//! // timer interrupt
//! motor_task.on_tick(&SHARED.tick_port());
//!
//! // main loop
//! let port = SHARED.main_port();
//! let ticks = port.take_ticks();
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use crate::control::planner::StepPlan;

pub struct Shared {
    plan: AtomicU32,
    total_steps: AtomicU32,
    pending_ticks: AtomicU32,
}

impl Shared {
    /// Motion disabled, zero steps, no pending ticks.
    pub const fn new() -> Self {
        Self {
            plan: AtomicU32::new(0),
            total_steps: AtomicU32::new(0),
            pending_ticks: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn tick_port(&self) -> TickPort<'_> {
        TickPort { shared: self }
    }

    #[inline]
    pub fn main_port(&self) -> MainPort<'_> {
        MainPort { shared: self }
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-side view.
#[derive(Copy, Clone)]
pub struct TickPort<'a> {
    shared: &'a Shared,
}

impl TickPort<'_> {
    /// Record one raw tick for the main loop. Saturates rather than wrapping back to zero.
    #[inline]
    pub fn record_tick(&self) {
        let _ = self
            .shared
            .pending_ticks
            .fetch_update(Ordering::Release, Ordering::Relaxed, |n| n.checked_add(1));
    }

    #[inline]
    pub fn publish_total_steps(&self, total: u32) {
        self.shared.total_steps.store(total, Ordering::Release);
    }

    /// Latest plan published by the main loop.
    #[inline]
    pub fn plan(&self) -> StepPlan {
        StepPlan::from_bits(self.shared.plan.load(Ordering::Acquire))
    }
}

/// Main-loop-side view.
#[derive(Copy, Clone)]
pub struct MainPort<'a> {
    shared: &'a Shared,
}

impl MainPort<'_> {
    /// Take all ticks recorded since the last call.
    #[inline]
    pub fn take_ticks(&self) -> u32 {
        self.shared.pending_ticks.swap(0, Ordering::Acquire)
    }

    /// Hand a new plan to the sequencer. It takes effect on the next gated motor tick.
    #[inline]
    pub fn publish_plan(&self, plan: StepPlan) {
        self.shared.plan.store(plan.to_bits(), Ordering::Release);
    }

    /// Coil steps taken since startup.
    #[inline]
    pub fn total_steps_taken(&self) -> u32 {
        self.shared.total_steps.load(Ordering::Acquire)
    }

    /// Plan as the interrupt currently sees it.
    #[inline]
    pub fn published_plan(&self) -> StepPlan {
        StepPlan::from_bits(self.shared.plan.load(Ordering::Relaxed))
    }
}
